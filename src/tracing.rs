use crate::Status;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

pub struct Tracing;

impl Tracing {
    /// Installs a stdout subscriber. `RUST_LOG` overrides the default INFO
    /// filter, e.g. `RUST_LOG=hltb=debug` to also print structured log events.
    pub fn setup(name: &str) -> Result<(), Status> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::Layer::new()
                    .with_target(true)
                    .with_writer(std::io::stderr.with_max_level(tracing::Level::TRACE)),
            )
            .try_init()
        {
            Ok(()) => {
                tracing::debug!("tracing initialized for {name}");
                Ok(())
            }
            Err(e) => {
                eprintln!("{e}");
                Err(Status::new("Failed to setup tracing", e))
            }
        }
    }
}
