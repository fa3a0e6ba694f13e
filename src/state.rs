use crate::client::CommissionClient;
use crate::view::CommissionView;

#[derive(Clone)]
pub struct AppState {
    pub view: CommissionView,
}

impl AppState {
    pub fn new(client: CommissionClient) -> Self {
        Self {
            view: CommissionView::new(client),
        }
    }
}
