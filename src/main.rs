use clap::Parser;
use github_aura_app::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let json = args.json;

    let report = github_aura_app::analyze_profile(args).await?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
