//! Stand-in authentication backend

use super::{AuthError, Authenticator};
use async_trait::async_trait;
use std::time::Duration;

/// Authenticator that accepts every credential pair after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, mobile_number: &str, _password: &str) -> Result<(), AuthError> {
        tracing::debug!(
            "Simulating authentication for {} ({}ms)",
            mask_mobile_number(mobile_number),
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Keep only the last two digits for log output
fn mask_mobile_number(mobile_number: &str) -> String {
    let count = mobile_number.chars().count();
    mobile_number
        .chars()
        .enumerate()
        .map(|(i, c)| if i + 2 < count { '*' } else { c })
        .collect()
}
