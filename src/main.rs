use loadstorm::error::AppResult;

fn main() -> AppResult<()> {
    loadstorm::run()
}
