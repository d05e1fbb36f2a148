// A fully wired engine over in-memory adapters, with the concrete adapters kept at hand so
// tests can seed data, inject outages and widen race windows.

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::modules::attendance::adapters::outbound::attendance_repository_in_memory::InMemoryAttendanceRepository;
use crate::modules::attendance::adapters::outbound::directory::Employee;
use crate::modules::attendance::adapters::outbound::directory_in_memory::{
    InMemoryEmployeeDirectory, InMemoryHolidayCalendar,
};
use crate::modules::attendance::adapters::outbound::settings_repository_in_memory::InMemorySettingsRepository;
use crate::modules::wfh::adapters::outbound::office_locator_static::{Office, StaticOfficeLocator};
use crate::modules::wfh::adapters::outbound::wfh_repository_in_memory::InMemoryWfhRepository;
use crate::modules::regularization::adapters::outbound::regularization_repository_in_memory::InMemoryRegularizationRepository;
use crate::modules::wfh::core::geo::Coordinates;
use crate::shared::core::business_time::BusinessClock;
use crate::shared::infrastructure::notification_outbox::Notification;
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shared::infrastructure::notification_outbox::in_memory::InMemoryNotificationGateway;
use crate::shell::config::Config;
use crate::shell::state::{Adapters, AppState};

pub const EMPLOYEE: &str = "emp-0001";
pub const COLLEAGUE: &str = "emp-0002";
pub const SUPPORT_ENGINEER: &str = "emp-0003";

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An IST wall-clock time as an instant.
pub fn ist(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    BusinessClock::ist().at(day(y, m, d), NaiveTime::from_hms_opt(h, min, 0).unwrap())
}

pub struct TestEngine {
    pub state: AppState,
    pub attendance: Arc<InMemoryAttendanceRepository>,
    pub settings_repository: Arc<InMemorySettingsRepository>,
    pub directory: Arc<InMemoryEmployeeDirectory>,
    pub holidays: Arc<InMemoryHolidayCalendar>,
    pub regularizations: Arc<InMemoryRegularizationRepository>,
    pub wfh: Arc<InMemoryWfhRepository>,
    pub locator: Arc<StaticOfficeLocator>,
    pub gateway: Arc<InMemoryNotificationGateway>,
}

impl TestEngine {
    pub async fn new() -> Self {
        let attendance = Arc::new(InMemoryAttendanceRepository::new());
        let settings_repository = Arc::new(InMemorySettingsRepository::new());
        let directory = Arc::new(InMemoryEmployeeDirectory::new());
        let holidays = Arc::new(InMemoryHolidayCalendar::new());
        let regularizations = Arc::new(InMemoryRegularizationRepository::new());
        let wfh = Arc::new(InMemoryWfhRepository::new());
        let locator = Arc::new(StaticOfficeLocator::new(vec![
            Office {
                name: "Bengaluru HQ".into(),
                location: Coordinates {
                    latitude: 12.9716,
                    longitude: 77.5946,
                },
            },
            Office {
                name: "Chennai".into(),
                location: Coordinates {
                    latitude: 13.0827,
                    longitude: 80.2707,
                },
            },
        ]));
        let gateway = Arc::new(InMemoryNotificationGateway::new());

        for (employee_id, name, department) in [
            (EMPLOYEE, "Asha Rao", "engineering"),
            (COLLEAGUE, "Vikram Iyer", "engineering"),
            (SUPPORT_ENGINEER, "Meera Nair", "support"),
        ] {
            directory
                .register(Employee {
                    employee_id: employee_id.into(),
                    name: name.into(),
                    department: Some(department.into()),
                })
                .await;
        }

        let config = Config::default();
        let (notifications, _relay) = NotificationDispatcher::spawn(gateway.clone(), 64);
        let state = AppState::new(
            Adapters {
                attendance: attendance.clone(),
                settings: settings_repository.clone(),
                directory: directory.clone(),
                holidays: holidays.clone(),
                regularizations: regularizations.clone(),
                wfh: wfh.clone(),
                locator: locator.clone(),
            },
            BusinessClock::ist(),
            &config,
            notifications,
        );

        Self {
            state,
            attendance,
            settings_repository,
            directory,
            holidays,
            regularizations,
            wfh,
            locator,
            gateway,
        }
    }

    /// Waits for the relay to deliver at least `count` notifications, then returns all of them.
    pub async fn wait_for_notifications(&self, count: usize) -> Vec<Notification> {
        for _ in 0..100 {
            {
                let delivered = self.gateway.delivered.lock().await;
                if delivered.len() >= count {
                    return delivered.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("expected {count} notifications, got {}", self.gateway.delivered_count().await);
    }
}

impl Deref for TestEngine {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}
