use std::sync::Arc;

use waypoint_core::PlanningService;

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<PlanningService>,
}

impl AppState {
    pub fn new(planner: PlanningService) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
