use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = concat!(
    "students_core=info,runner_lambda=info,",
    "get_students=info,insert_student=info,students_local=info"
);

/// Installs the global subscriber. Lines carry no timestamp; CloudWatch adds one.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();
}
