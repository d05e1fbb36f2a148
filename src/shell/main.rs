use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use attendance_engine::modules::attendance::adapters::outbound::attendance_repository_in_memory::InMemoryAttendanceRepository;
use attendance_engine::modules::attendance::adapters::outbound::directory_in_memory::{
    InMemoryEmployeeDirectory, InMemoryHolidayCalendar,
};
use attendance_engine::modules::attendance::adapters::outbound::settings_repository_in_memory::InMemorySettingsRepository;
use attendance_engine::modules::regularization::adapters::outbound::regularization_repository_in_memory::InMemoryRegularizationRepository;
use attendance_engine::modules::wfh::adapters::outbound::office_locator_static::StaticOfficeLocator;
use attendance_engine::modules::wfh::adapters::outbound::wfh_repository_in_memory::InMemoryWfhRepository;
use attendance_engine::shared::core::business_time::BusinessClock;
use attendance_engine::shared::infrastructure::notification_outbox::tracing_gateway::TracingNotificationGateway;
use attendance_engine::shell::config::Config;
use attendance_engine::shell::http::router;
use attendance_engine::shell::state::{Adapters, AppState};
use attendance_engine::shell::workers::spawn_notification_relay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    fmt().with_env_filter(filter).init();

    let clock = BusinessClock::from_offset_minutes(config.business_utc_offset_minutes)?;

    // In-memory adapters; a persistent backend implements the same ports.
    let directory = Arc::new(InMemoryEmployeeDirectory::new());
    for employee in config.employees.iter().cloned() {
        directory.register(employee).await;
    }
    let adapters = Adapters {
        attendance: Arc::new(InMemoryAttendanceRepository::new()),
        settings: Arc::new(InMemorySettingsRepository::new()),
        directory,
        holidays: Arc::new(InMemoryHolidayCalendar::new()),
        regularizations: Arc::new(InMemoryRegularizationRepository::new()),
        wfh: Arc::new(InMemoryWfhRepository::new()),
        locator: Arc::new(StaticOfficeLocator::new(config.offices.clone())),
    };

    let (notifications, _relay) =
        spawn_notification_relay(&config, Arc::new(TracingNotificationGateway));
    let state = AppState::new(adapters, clock, &config, notifications);

    tracing::info!(
        addr = %config.http_addr,
        offset_minutes = config.business_utc_offset_minutes,
        employees = config.employees.len(),
        offices = config.offices.len(),
        "attendance engine listening"
    );
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
