use super::check_required;
use crate::{
    command_handler::CommandHandler,
    context::ExecutionContext,
    dto::OwnerDto,
    error::AppError,
    validation::{Issues, ValidationContext, ValidationIssue},
};
use async_trait::async_trait;
use serde::Deserialize;
use vehicle_domain::{CatalogService, entities::Owner};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOwnerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateOwnerHandler {
    service: CatalogService,
}

impl CreateOwnerHandler {
    pub const NAME: &'static str = "CreateOwner";

    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for CreateOwnerHandler {
    type Request = CreateOwnerRequest;
    type Response = OwnerDto;

    fn validate(&self, request: &CreateOwnerRequest, _ctx: &ValidationContext) -> Vec<ValidationIssue> {
        let mut issues = Issues::new();
        check_required(&mut issues, "name", &request.name);
        if request.email.trim().is_empty() {
            issues.push("email", "email is required");
        } else {
            issues.ensure(
                is_plausible_email(request.email.trim()),
                "email",
                "email is not a valid address",
            );
        }
        issues.into_vec()
    }

    async fn execute(
        &self,
        request: CreateOwnerRequest,
        ctx: &mut ExecutionContext,
    ) -> Result<OwnerDto, AppError> {
        let owner = Owner::builder()
            .name(request.name.trim())
            .email(request.email.trim().to_lowercase())
            .phone(request.phone)
            .address(request.address)
            .build();

        let owner = self.service.create_owner(ctx.unit_of_work()?, owner).await?;
        Ok(OwnerDto::from(&owner))
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_plausible_email("ana@example.com"));
        assert!(!is_plausible_email("ana.example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ana@localhost"));
        assert!(!is_plausible_email("a@b@c.com"));
    }
}
