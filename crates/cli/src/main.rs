mod cmd;
mod util;

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

fn main() {
    let env_filter = EnvFilter::builder()
        // Default to info level
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let args: cmd::testgrid_config::Args = argp::parse_args_or_exit(argp::DEFAULT);
    if let Err(e) = cmd::testgrid_config::run(args) {
        tracing::error!("{e:?}");
        std::process::exit(1);
    }
}
