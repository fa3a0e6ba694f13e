use crate::client::CommissionClient;
use crate::models::{DateInputs, RequestState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug)]
struct ViewData {
    inputs: DateInputs,
    request: RequestState,
}

/// Date inputs plus the presentation state of the last report request.
///
/// Cloning shares the same underlying state. The lock is only taken for
/// short updates, never across the outbound request, so a page render
/// during a fetch observes `Loading`.
#[derive(Clone)]
pub struct CommissionView {
    client: CommissionClient,
    data: Arc<Mutex<ViewData>>,
}

impl CommissionView {
    pub fn new(client: CommissionClient) -> Self {
        Self::with_inputs(client, DateInputs::default())
    }

    pub fn with_inputs(client: CommissionClient, inputs: DateInputs) -> Self {
        Self {
            client,
            data: Arc::new(Mutex::new(ViewData {
                inputs,
                request: RequestState::Idle,
            })),
        }
    }

    pub async fn snapshot(&self) -> (DateInputs, RequestState) {
        let data = self.data.lock().await;
        (data.inputs.clone(), data.request.clone())
    }

    /// Runs one report request to completion. Always ends in `Loaded` or
    /// `Error`; concurrent calls are not fenced and the last to finish wins.
    pub async fn request_report(&self, inputs: DateInputs) -> RequestState {
        let range = {
            let mut data = self.data.lock().await;
            data.inputs = inputs.clone();
            match inputs.validate() {
                Ok(range) => {
                    data.request = RequestState::Loading;
                    range
                }
                Err(err) => {
                    debug!(?inputs, "rejected date range: {err}");
                    data.request = RequestState::Error {
                        message: err.to_string(),
                    };
                    return data.request.clone();
                }
            }
        };

        info!(start = %range.start(), end = %range.end(), "requesting commission report");
        let next = match self.client.fetch_report(&range).await {
            Ok(report) => RequestState::Loaded { report },
            Err(err) => RequestState::Error {
                message: err.to_string(),
            },
        };

        let mut data = self.data.lock().await;
        data.request = next.clone();
        next
    }
}
