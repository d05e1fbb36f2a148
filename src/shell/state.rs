// Application state shared by the HTTP adapters: every use case handler, wired once.

use std::sync::Arc;

use crate::modules::attendance::adapters::outbound::attendance_repository::AttendanceRepository;
use crate::modules::attendance::adapters::outbound::directory::{EmployeeDirectory, HolidayCalendar};
use crate::modules::attendance::adapters::outbound::settings_repository::SettingsRepository;
use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::attendance::use_cases::check_in::handler::CheckInHandler;
use crate::modules::attendance::use_cases::check_out::handler::CheckOutHandler;
use crate::modules::attendance::use_cases::list_attendance::handler::ListAttendanceHandler;
use crate::modules::attendance::use_cases::resolve_settings::handler::SettingsResolver;
use crate::modules::regularization::adapters::outbound::regularization_repository::RegularizationRepository;
use crate::modules::regularization::use_cases::list_regularizations::handler::ListRegularizationsHandler;
use crate::modules::regularization::use_cases::review_regularization::handler::ReviewRegularizationHandler;
use crate::modules::regularization::use_cases::submit_regularization::handler::SubmitRegularizationHandler;
use crate::modules::wfh::adapters::outbound::office_locator::OfficeLocator;
use crate::modules::wfh::adapters::outbound::wfh_repository::WfhRepository;
use crate::modules::wfh::use_cases::list_wfh::handler::ListWfhHandler;
use crate::modules::wfh::use_cases::review_wfh::handler::ReviewWfhHandler;
use crate::modules::wfh::use_cases::submit_wfh::handler::SubmitWfhHandler;
use crate::shared::core::business_time::BusinessClock;
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shell::config::Config;

/// Outbound adapters the engine runs against.
pub struct Adapters {
    pub attendance: Arc<dyn AttendanceRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub directory: Arc<dyn EmployeeDirectory>,
    pub holidays: Arc<dyn HolidayCalendar>,
    pub regularizations: Arc<dyn RegularizationRepository>,
    pub wfh: Arc<dyn WfhRepository>,
    pub locator: Arc<dyn OfficeLocator>,
}

#[derive(Clone)]
pub struct AppState {
    pub clock: BusinessClock,
    pub settings: Arc<SettingsResolver>,
    pub store: Arc<AttendanceStore>,
    pub check_in: Arc<CheckInHandler>,
    pub check_out: Arc<CheckOutHandler>,
    pub list_attendance: Arc<ListAttendanceHandler>,
    pub submit_regularization: Arc<SubmitRegularizationHandler>,
    pub review_regularization: Arc<ReviewRegularizationHandler>,
    pub list_regularizations: Arc<ListRegularizationsHandler>,
    pub submit_wfh: Arc<SubmitWfhHandler>,
    pub review_wfh: Arc<ReviewWfhHandler>,
    pub list_wfh: Arc<ListWfhHandler>,
}

impl AppState {
    pub fn new(
        adapters: Adapters,
        clock: BusinessClock,
        config: &Config,
        notifications: NotificationDispatcher,
    ) -> Self {
        let settings = Arc::new(SettingsResolver::new(
            adapters.settings,
            config.settings_cache_ttl,
            config.settings_cache_capacity,
        ));
        let store = Arc::new(AttendanceStore::new(
            adapters.attendance.clone(),
            adapters.directory,
            settings.clone(),
            clock,
        ));

        Self {
            clock,
            check_in: Arc::new(CheckInHandler::new(store.clone())),
            check_out: Arc::new(CheckOutHandler::new(store.clone())),
            list_attendance: Arc::new(ListAttendanceHandler::new(
                adapters.attendance,
                adapters.holidays,
                store.clone(),
            )),
            submit_regularization: Arc::new(SubmitRegularizationHandler::new(
                adapters.regularizations.clone(),
                store.clone(),
                notifications.clone(),
            )),
            review_regularization: Arc::new(ReviewRegularizationHandler::new(
                adapters.regularizations.clone(),
                store.clone(),
                notifications.clone(),
            )),
            list_regularizations: Arc::new(ListRegularizationsHandler::new(
                adapters.regularizations,
            )),
            submit_wfh: Arc::new(SubmitWfhHandler::new(
                adapters.wfh.clone(),
                adapters.locator,
                store.clone(),
                notifications.clone(),
            )),
            review_wfh: Arc::new(ReviewWfhHandler::new(
                adapters.wfh.clone(),
                store.clone(),
                notifications,
            )),
            list_wfh: Arc::new(ListWfhHandler::new(adapters.wfh)),
            settings,
            store,
        }
    }
}
