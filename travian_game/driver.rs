use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use travian_types::{units::UnitName, Resources};

/// Transient or fatal failures from the browser-driving layer. Transient
/// failures (§7) are swallowed by the job that hit them and reported as
/// `false`; fatal ones propagate and restart the driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("timed out waiting for {0}")]
    Timeout(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("driver session is no longer usable: {0}")]
    Fatal(String),
}

/// Minimal surface a job or the observation pass needs from a headless
/// browser session (§6.2). A production implementation driving a real
/// browser is out of scope for this repository; see [`FakeDriver`] for the
/// in-memory stand-in this crate ships and tests against.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn navigate(&self, path: &str) -> Result<(), DriverError>;
    async fn navigate_to_village(&self, village_id: u32) -> Result<(), DriverError>;
    async fn stop(&self) -> Result<(), DriverError>;
    async fn get_html(&self, page_name: &str) -> Result<String, DriverError>;
    async fn get_village_inner_html(
        &self,
        village_id: u32,
    ) -> Result<(String, String), DriverError>;
    async fn get_page_source(&self, iframe_selector: &str) -> Result<String, DriverError>;
    async fn click(&self, selector: &str) -> Result<bool, DriverError>;
    async fn click_first(&self, selectors: &[&str]) -> Result<bool, DriverError>;
    async fn click_all(&self, selectors: &[&str]) -> Result<u32, DriverError>;
    async fn click_nth(&self, selector: &str, index: usize) -> Result<bool, DriverError>;
    async fn wait_for_load_state(&self, timeout_ms: u64) -> Result<(), DriverError>;
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<bool, DriverError>;
    async fn wait_for_selector_and_click(
        &self,
        selector: &str,
        timeout_ms: u64,
    ) -> Result<bool, DriverError>;
    async fn current_url(&self) -> Result<String, DriverError>;
    async fn is_visible(&self, selector: &str) -> Result<bool, DriverError>;
    async fn get_text_content(&self, selector: &str) -> Result<String, DriverError>;
    async fn catch_full_classes_by_selector(&self, selector: &str) -> Result<String, DriverError>;
    async fn transfer_resources_from_hero(&self, resources: Resources) -> Result<(), DriverError>;
    async fn press_key(&self, key: &str) -> Result<(), DriverError>;
    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError>;
    async fn send_merchant(
        &self,
        origin_village_id: u32,
        market_id: u32,
        target: (i32, i32),
        resources: Resources,
    ) -> Result<bool, DriverError>;
    async fn train_troops(
        &self,
        village_id: u32,
        building_id: u32,
        troop_type: UnitName,
        quantity: u32,
    ) -> Result<bool, DriverError>;
    async fn sleep(&self, seconds: u64);
    /// Capability seam for `FoundNewVillageJob` (§9 resolved open question):
    /// a production driver would scan the map for an abandoned valley; the
    /// fake returns a configurable fixed coordinate.
    async fn find_abandoned_valley(&self) -> Result<(i32, i32), DriverError>;
}

/// Every call the fake driver received, in order, for assertions in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Navigate(String),
    NavigateToVillage(u32),
    Click(String),
    ClickNth(String, usize),
    TransferResourcesFromHero,
    TrainTroops(u32, u32, UnitName, u32),
    Sleep(u64),
}

/// In-memory `Driver` used by this crate's own tests and, until a real
/// browser-driving implementation exists, by the agent binary's dry-run
/// mode. Every primitive succeeds unconditionally; callers can inspect
/// [`FakeDriver::calls`] afterwards.
pub struct FakeDriver {
    pub abandoned_valley: (i32, i32),
    /// Canned `get_text_content` responses keyed by selector; an unlisted
    /// selector returns an empty string.
    pub text_content: HashMap<String, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for FakeDriver {
    fn default() -> Self {
        Self {
            abandoned_valley: (50, 50),
            text_content: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDriver {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Driver for FakeDriver {
    async fn navigate(&self, path: &str) -> Result<(), DriverError> {
        self.record(RecordedCall::Navigate(path.to_string()));
        Ok(())
    }

    async fn navigate_to_village(&self, village_id: u32) -> Result<(), DriverError> {
        self.record(RecordedCall::NavigateToVillage(village_id));
        Ok(())
    }

    async fn stop(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn get_html(&self, _page_name: &str) -> Result<String, DriverError> {
        Ok(String::new())
    }

    async fn get_village_inner_html(
        &self,
        _village_id: u32,
    ) -> Result<(String, String), DriverError> {
        Ok((String::new(), String::new()))
    }

    async fn get_page_source(&self, _iframe_selector: &str) -> Result<String, DriverError> {
        Ok(String::new())
    }

    async fn click(&self, selector: &str) -> Result<bool, DriverError> {
        self.record(RecordedCall::Click(selector.to_string()));
        Ok(true)
    }

    async fn click_first(&self, selectors: &[&str]) -> Result<bool, DriverError> {
        if let Some(selector) = selectors.first() {
            self.record(RecordedCall::Click(selector.to_string()));
        }
        Ok(true)
    }

    async fn click_all(&self, selectors: &[&str]) -> Result<u32, DriverError> {
        Ok(selectors.len() as u32)
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<bool, DriverError> {
        self.record(RecordedCall::ClickNth(selector.to_string(), index));
        Ok(true)
    }

    async fn wait_for_load_state(&self, _timeout_ms: u64) -> Result<(), DriverError> {
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        _selector: &str,
        _timeout_ms: u64,
    ) -> Result<bool, DriverError> {
        Ok(true)
    }

    async fn wait_for_selector_and_click(
        &self,
        selector: &str,
        _timeout_ms: u64,
    ) -> Result<bool, DriverError> {
        self.record(RecordedCall::Click(selector.to_string()));
        Ok(true)
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok("https://fake.travian.test/dorf1.php".to_string())
    }

    async fn is_visible(&self, _selector: &str) -> Result<bool, DriverError> {
        Ok(false)
    }

    async fn get_text_content(&self, selector: &str) -> Result<String, DriverError> {
        Ok(self.text_content.get(selector).cloned().unwrap_or_default())
    }

    async fn catch_full_classes_by_selector(&self, _selector: &str) -> Result<String, DriverError> {
        Ok(String::new())
    }

    async fn transfer_resources_from_hero(&self, _resources: Resources) -> Result<(), DriverError> {
        self.record(RecordedCall::TransferResourcesFromHero);
        Ok(())
    }

    async fn press_key(&self, _key: &str) -> Result<(), DriverError> {
        Ok(())
    }

    async fn select_option(&self, _selector: &str, _value: &str) -> Result<(), DriverError> {
        Ok(())
    }

    async fn send_merchant(
        &self,
        _origin_village_id: u32,
        _market_id: u32,
        _target: (i32, i32),
        _resources: Resources,
    ) -> Result<bool, DriverError> {
        Ok(true)
    }

    async fn train_troops(
        &self,
        village_id: u32,
        building_id: u32,
        troop_type: UnitName,
        quantity: u32,
    ) -> Result<bool, DriverError> {
        self.record(RecordedCall::TrainTroops(
            village_id,
            building_id,
            troop_type,
            quantity,
        ));
        Ok(true)
    }

    async fn sleep(&self, seconds: u64) {
        self.record(RecordedCall::Sleep(seconds));
    }

    async fn find_abandoned_valley(&self) -> Result<(i32, i32), DriverError> {
        Ok(self.abandoned_valley)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_driver_records_calls_in_order() {
        let driver = FakeDriver::default();
        driver.navigate("/dorf1.php").await.unwrap();
        driver.click("#build").await.unwrap();
        assert_eq!(
            driver.calls(),
            vec![
                RecordedCall::Navigate("/dorf1.php".to_string()),
                RecordedCall::Click("#build".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn fake_driver_returns_configured_valley() {
        let driver = FakeDriver {
            abandoned_valley: (12, 34),
            ..Default::default()
        };
        assert_eq!(driver.find_abandoned_valley().await.unwrap(), (12, 34));
    }
}
