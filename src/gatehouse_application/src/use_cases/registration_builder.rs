use gatehouse_core::{
    ACCOUNT_UPDATE, AccountUpdate, Invite, InviteCode, Locale, PermittedParams, Principal,
    Profile, RawParams, RegistrationCandidate, SIGN_UP, SiteConfig, domain::params,
};
use secrecy::Secret;

/// Ambient request state the builder fills defaults from.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub locale: &'a Locale,
    pub invite: Option<&'a Invite>,
}

/// Turns submitted form parameters into unsaved resources.
pub struct RegistrationResourceBuilder;

impl RegistrationResourceBuilder {
    /// Builds a sign-up candidate.
    ///
    /// Only allow-listed keys are read. Locale comes from the request, the invite code
    /// from the resolved invite when none was typed in, and the profile always exists.
    pub fn build(raw: &RawParams, context: &BuildContext<'_>) -> RegistrationCandidate {
        let mut permitted = permit(&SIGN_UP, raw);

        let mut candidate = RegistrationCandidate {
            email: permitted.take(params::EMAIL).unwrap_or_default(),
            password: permitted.take(params::PASSWORD).map(Secret::new),
            password_confirmation: permitted
                .take(params::PASSWORD_CONFIRMATION)
                .map(Secret::new),
            locale: None,
            invite_code: permitted
                .get(params::INVITE_CODE)
                .and_then(InviteCode::parse),
            profile: permitted
                .take(params::USERNAME)
                .map(|username| Profile { username }),
        };

        if candidate.locale.is_none() {
            candidate.locale = Some(context.locale.clone());
        }

        if candidate.invite_code.is_none() {
            candidate.invite_code = context.invite.map(|invite| invite.code().clone());
        }

        if candidate.profile.is_none() {
            candidate.profile = Some(Profile::default());
        }

        candidate
    }

    /// Builds the changes a principal submitted for their own record.
    ///
    /// When identities are managed externally and the principal has no local password,
    /// any password change is dropped so one can't be created through this form.
    pub fn build_update(raw: &RawParams, principal: &Principal, site: &SiteConfig) -> AccountUpdate {
        let mut permitted = permit(&ACCOUNT_UPDATE, raw);

        let mut update = AccountUpdate {
            email: permitted.take(params::EMAIL),
            password: permitted.take(params::PASSWORD).map(Secret::new),
            password_confirmation: permitted
                .take(params::PASSWORD_CONFIRMATION)
                .map(Secret::new),
            current_password: permitted.take(params::CURRENT_PASSWORD).map(Secret::new),
            username: permitted.take(params::USERNAME),
        };

        if site.external_identity_auth_mode && !principal.has_local_credential {
            if update.password.is_some() {
                tracing::debug!(principal_id = %principal.id, "Ignoring password change for external identity");
            }
            update.discard_password();
        }

        update
    }
}

fn permit(schema: &gatehouse_core::ParamSchema, raw: &RawParams) -> PermittedParams {
    let permitted = schema.permit(raw);
    if !permitted.unpermitted().is_empty() {
        tracing::debug!(keys = ?permitted.unpermitted(), "Unpermitted parameters");
    }
    permitted
}
