use gatehouse_core::{
    AccountStore, AccountStoreError, AccountUpdate, AdmissionDecision, AdmissionPolicy,
    AdmissionReason, Destination, FieldErrors,
    HumanVerifier, Invite, InviteStore, Layout, Locale, PersistedAccount, Principal, RawParams,
    RegistrationCandidate, SessionContext, SessionStore, SessionStoreError, SiteConfig, View,
};
use serde::Serialize;

use super::{
    invite_lookup::InviteLookup,
    registration_builder::{BuildContext, RegistrationResourceBuilder},
};

/// Error types for the registration flow.
///
/// Everything a requester can cause (denial, failed verification, invalid input) is a
/// `FlowOutcome`; only collaborator breakage ends up here.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] SessionStoreError),
}

/// One submitted registration request.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub params: RawParams,
    /// Locale already resolved for this request.
    pub locale: Locale,
}

/// The resource a rendered form is filled from.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FormResource {
    Candidate(RegistrationCandidate),
    Account {
        principal: Principal,
        pending: Option<AccountUpdate>,
    },
}

/// A form to show, with whatever errors it comes back with.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedForm {
    pub view: View,
    pub layout: Layout,
    pub resource: FormResource,
    pub errors: FieldErrors,
    pub sessions: SessionContext,
    /// The submission was turned down and the form is shown again.
    #[serde(skip)]
    pub rejected: bool,
}

impl RenderedForm {
    fn sign_up(candidate: RegistrationCandidate, errors: FieldErrors, rejected: bool) -> Self {
        Self {
            view: View::New,
            layout: View::New.layout(),
            resource: FormResource::Candidate(candidate),
            errors,
            sessions: SessionContext::default(),
            rejected,
        }
    }

    fn profile(
        principal: Principal,
        pending: Option<AccountUpdate>,
        errors: FieldErrors,
        sessions: SessionContext,
    ) -> Self {
        let rejected = pending.is_some();
        Self {
            view: View::Edit,
            layout: View::Edit.layout(),
            resource: FormResource::Account { principal, pending },
            errors,
            sessions,
            rejected,
        }
    }

    pub fn candidate(&self) -> Option<&RegistrationCandidate> {
        match &self.resource {
            FormResource::Candidate(candidate) => Some(candidate),
            FormResource::Account { .. } => None,
        }
    }
}

/// What a registration step resolved to.
#[derive(Debug, Clone)]
pub enum FlowOutcome {
    Redirect(Destination),
    Render(Box<RenderedForm>),
    NotFound,
}

/// Orchestrates the `new`, `create`, `edit` and `update` registration steps.
///
/// Gate order on `create`: human verification, then invite lookup and admission, then
/// building and persisting the candidate. A failed verification shows the form again with
/// a freshly built and validated candidate; a denied admission silently sends the
/// requester to the site root. An attempt admitted by an invite is always registered with
/// that invite's code.
#[derive(Clone)]
pub struct RegistrationFlow<I, A, S, V>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
{
    invite_store: I,
    account_store: A,
    session_store: S,
    verifier: V,
}

impl<I, A, S, V> RegistrationFlow<I, A, S, V>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
{
    pub fn new(invite_store: I, account_store: A, session_store: S, verifier: V) -> Self {
        Self {
            invite_store,
            account_store,
            session_store,
            verifier,
        }
    }

    pub fn invite_store(&self) -> &I {
        &self.invite_store
    }

    pub fn account_store(&self) -> &A {
        &self.account_store
    }

    pub fn session_store(&self) -> &S {
        &self.session_store
    }

    /// Show the empty sign-up form.
    #[tracing::instrument(name = "RegistrationFlow::new_registration", skip_all)]
    pub async fn new_registration(
        &self,
        site: &SiteConfig,
        request: &RegistrationRequest,
    ) -> FlowOutcome {
        let lookup = InviteLookup::new(&self.invite_store, request.params.invite_code());
        let invite = lookup.resolve().await;
        if !admission(site, invite).allowed {
            return FlowOutcome::Redirect(Destination::Root);
        }

        let context = BuildContext {
            locale: &request.locale,
            invite,
        };
        let candidate = RegistrationResourceBuilder::build(&RawParams::new(), &context);

        FlowOutcome::Render(Box::new(RenderedForm::sign_up(
            candidate,
            FieldErrors::new(),
            false,
        )))
    }

    /// Attempt a sign-up.
    #[tracing::instrument(name = "RegistrationFlow::create", skip_all)]
    pub async fn create(
        &self,
        site: &SiteConfig,
        request: &RegistrationRequest,
    ) -> Result<FlowOutcome, FlowError> {
        let verification = self.verifier.challenge(&request.params).await;
        if !verification.passed {
            tracing::info!(
                provider_response = ?verification.provider_response,
                "Human verification failed"
            );
            let context = BuildContext {
                locale: &request.locale,
                invite: None,
            };
            let candidate = RegistrationResourceBuilder::build(&request.params, &context);
            let errors = candidate.validate();
            return Ok(FlowOutcome::Render(Box::new(RenderedForm::sign_up(
                candidate, errors, true,
            ))));
        }

        let lookup = InviteLookup::new(&self.invite_store, request.params.invite_code());
        let invite = lookup.resolve().await;
        let decision = admission(site, invite);
        if !decision.allowed {
            return Ok(FlowOutcome::Redirect(Destination::Root));
        }

        let context = BuildContext {
            locale: &request.locale,
            invite,
        };
        let mut candidate = RegistrationResourceBuilder::build(&request.params, &context);

        // The invite that admitted the attempt is the one the account is registered with.
        if let (AdmissionReason::ValidInvite, Some(invite)) = (decision.reason, invite) {
            if candidate.invite_code.as_ref() != Some(invite.code()) {
                tracing::debug!("Submitted invite code replaced by the admitting invite");
                candidate.invite_code = Some(invite.code().clone());
            }
        }

        match self.account_store.persist(&candidate).await {
            Ok(account) => {
                tracing::info!(
                    account_id = %account.id,
                    active = account.active,
                    "Account registered"
                );
                Ok(FlowOutcome::Redirect(after_sign_up_destination(&account)))
            }
            Err(AccountStoreError::Invalid(errors)) => Ok(FlowOutcome::Render(Box::new(
                RenderedForm::sign_up(candidate, errors, true),
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Show the profile-edit form for an authenticated principal.
    #[tracing::instrument(name = "RegistrationFlow::edit", skip_all, fields(principal_id = %principal.id))]
    pub async fn edit(&self, principal: &Principal) -> Result<FlowOutcome, FlowError> {
        let sessions = self.load_sessions(principal).await?;

        Ok(FlowOutcome::Render(Box::new(RenderedForm::profile(
            principal.clone(),
            None,
            FieldErrors::new(),
            sessions,
        ))))
    }

    /// Attempt a profile change for an authenticated principal.
    #[tracing::instrument(name = "RegistrationFlow::update", skip_all, fields(principal_id = %principal.id))]
    pub async fn update(
        &self,
        site: &SiteConfig,
        principal: &Principal,
        request: &RegistrationRequest,
    ) -> Result<FlowOutcome, FlowError> {
        let sessions = self.load_sessions(principal).await?;
        let update = RegistrationResourceBuilder::build_update(&request.params, principal, site);

        match self
            .account_store
            .update_persisted(principal, &update)
            .await
        {
            Ok(_) => Ok(FlowOutcome::Redirect(after_update_destination())),
            Err(AccountStoreError::Invalid(errors)) => Ok(FlowOutcome::Render(Box::new(
                RenderedForm::profile(principal.clone(), Some(update), errors, sessions),
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Accounts are never deleted through the registration flow.
    pub fn destroy(&self) -> FlowOutcome {
        FlowOutcome::NotFound
    }

    /// Where to land right after signing in.
    ///
    /// The invite is resolved again from the sign-in request: an autofollow invite sends
    /// the new account to the inviter's public page.
    #[tracing::instrument(name = "RegistrationFlow::after_sign_in", skip_all)]
    pub async fn after_sign_in(&self, params: &RawParams) -> Destination {
        let lookup = InviteLookup::new(&self.invite_store, params.invite_code());
        match lookup.resolve().await {
            Some(invite) if invite.autofollow() => Destination::AccountPage(invite.owner().clone()),
            _ => Destination::AfterSignIn,
        }
    }

    /// The principal behind a session cookie.
    pub async fn current_principal(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<Principal>, FlowError> {
        let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        Ok(self.session_store.principal_for_session(session_id).await?)
    }

    async fn load_sessions(&self, principal: &Principal) -> Result<SessionContext, FlowError> {
        let sessions = self.session_store.active_sessions(principal).await?;
        Ok(SessionContext::new(sessions))
    }
}

fn admission(site: &SiteConfig, invite: Option<&Invite>) -> AdmissionDecision {
    let decision = AdmissionPolicy::decide(site, invite);
    tracing::debug!(allowed = decision.allowed, reason = ?decision.reason, "Admission decided");
    decision
}

/// Active and unconfirmed accounts alike are sent to sign in.
pub fn after_sign_up_destination(_account: &PersistedAccount) -> Destination {
    Destination::SignIn
}

pub fn after_update_destination() -> Destination {
    Destination::EditRegistration
}
