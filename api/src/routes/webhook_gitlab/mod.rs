pub mod webhook_gitlab_route;
pub mod webhook_response;
