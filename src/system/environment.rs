use std::fmt;

use serde::Serialize;
use sysinfo::System;

const UNKNOWN: &str = "unknown";
const BYTES_PER_GB: u128 = 1024 * 1024 * 1024;

/// Host the load was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentDetails {
    pub hostname: String,
    pub operating_system: String,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub total_memory_bytes: u64,
}

impl EnvironmentDetails {
    /// Reads the host description. Fields the platform does not expose are
    /// reported as "unknown".
    #[must_use]
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        sys.refresh_memory();

        let operating_system = match (System::name(), System::kernel_version()) {
            (Some(name), Some(kernel)) => format!("{} {}", name, kernel),
            (Some(name), None) => name,
            (None, Some(kernel)) => kernel,
            (None, None) => UNKNOWN.to_owned(),
        };
        let cpu_model = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_owned())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_owned());

        let details = Self {
            hostname: System::host_name().unwrap_or_else(|| UNKNOWN.to_owned()),
            operating_system,
            cpu_model,
            cpu_cores: sys.cpus().len(),
            total_memory_bytes: sys.total_memory(),
        };
        tracing::debug!("Collected environment details: {:?}", details);
        details
    }

    /// Total memory in hundredths of a GiB, rounded half up.
    #[must_use]
    pub fn memory_gb_x100(&self) -> u64 {
        let scaled = u128::from(self.total_memory_bytes)
            .saturating_mul(100)
            .saturating_add(BYTES_PER_GB / 2)
            .checked_div(BYTES_PER_GB)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn memory_display(&self) -> String {
        let value = self.memory_gb_x100();
        format!(
            "{}.{:02} GB",
            value.checked_div(100).unwrap_or(0),
            value.checked_rem(100).unwrap_or(0)
        )
    }

    /// Field list in report order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("Hostname", self.hostname.clone()),
            ("Operating System", self.operating_system.clone()),
            ("CPU Model", self.cpu_model.clone()),
            ("Memory", self.memory_display()),
        ]
    }
}

impl fmt::Display for EnvironmentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, value) in self.fields() {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            write!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(total_memory_bytes: u64) -> EnvironmentDetails {
        EnvironmentDetails {
            hostname: "bench-01".to_owned(),
            operating_system: "Linux 6.8.0".to_owned(),
            cpu_model: "Test CPU @ 3.00GHz".to_owned(),
            cpu_cores: 8,
            total_memory_bytes,
        }
    }

    #[test]
    fn memory_is_reported_in_gb_with_two_decimals() -> Result<(), String> {
        let cases = [
            (16 * 1024 * 1024 * 1024, "16.00 GB"),
            (1536 * 1024 * 1024, "1.50 GB"),
            (0, "0.00 GB"),
            // 7.999 GiB rounds up.
            (8_588_860_000, "8.00 GB"),
        ];
        for (bytes, expected) in cases {
            let got = sample(bytes).memory_display();
            if got != expected {
                return Err(format!("{} bytes: expected {}, got {}", bytes, expected, got));
            }
        }
        Ok(())
    }

    #[test]
    fn display_joins_fields_in_order() -> Result<(), String> {
        let rendered = sample(2 * 1024 * 1024 * 1024).to_string();
        let expected = "Hostname: bench-01 | Operating System: Linux 6.8.0 | \
                        CPU Model: Test CPU @ 3.00GHz | Memory: 2.00 GB";
        if rendered != expected {
            return Err(format!("Unexpected description: {}", rendered));
        }
        Ok(())
    }

    #[test]
    fn collect_fills_every_field() -> Result<(), String> {
        let details = EnvironmentDetails::collect();
        if details.hostname.is_empty()
            || details.operating_system.is_empty()
            || details.cpu_model.is_empty()
        {
            return Err(format!("Empty field in {:?}", details));
        }
        Ok(())
    }
}
