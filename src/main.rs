use sweepbench::error::AppResult;

fn main() -> AppResult<()> {
    sweepbench::run()
}
