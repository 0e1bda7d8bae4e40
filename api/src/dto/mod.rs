//! Request and response shapes for the HTTP surface

pub mod session_dto;

pub use session_dto::{
    IssueResponse, PolicyUpdateRequest, RenewResponse, SessionInfoResponse, StatusResponse,
};
