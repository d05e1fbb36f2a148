// Office locator over a fixed list of office coordinates.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::modules::wfh::adapters::outbound::office_locator::{LocatorError, OfficeLocator};
use crate::modules::wfh::core::geo::{Coordinates, distance_m};
use crate::modules::wfh::core::request::NearestOffice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub name: String,
    pub location: Coordinates,
}

#[derive(Default)]
pub struct StaticOfficeLocator {
    offices: Vec<Office>,
    is_offline: AtomicBool,
}

impl StaticOfficeLocator {
    pub fn new(offices: Vec<Office>) -> Self {
        Self {
            offices,
            is_offline: AtomicBool::new(false),
        }
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl OfficeLocator for StaticOfficeLocator {
    async fn nearest(&self, at: Coordinates) -> Result<Option<NearestOffice>, LocatorError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(LocatorError::Unavailable("Office locator offline".into()));
        }
        Ok(self
            .offices
            .iter()
            .map(|office| NearestOffice {
                name: office.name.clone(),
                distance_m: distance_m(at, office.location),
            })
            .min_by(|a, b| a.distance_m.total_cmp(&b.distance_m)))
    }
}
