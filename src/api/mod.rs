//! HTTP facade for the Loontijdvak and Forfait Propagation Engine.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateAssignmentRequest, EmployeeComponentsRequest, OrganizationRequest, PayrollRunRequest,
    RunComponentRequest, SetForfaitRuleRequest, UpdateAssignmentRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, AssignmentResponse, ForfaitRuleResponse, PropagationResponse,
};
pub use state::AppState;
