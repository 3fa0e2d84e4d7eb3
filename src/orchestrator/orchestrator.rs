//! The per-request entry point.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use super::RequestPhase;
use super::write_set::{check_write_set, into_write_set};
use crate::config::OrchestratorConfig;
use crate::dispatch::FunctionDispatcher;
use crate::persistence::Persistence;
use crate::registry::{FieldKind, RegisteredType, ResourceRegistry};
use crate::types::{
    Access, AttributeValue, FunctionResult, InstanceRef, Operation, Principal, ReadResponse, Request,
    ResourceId, ResourceInstance, Response, WriteSet,
};
use crate::{AccessDenied, Error, Result};

/// Resolves, authorizes and serves resource requests.
///
/// Every request passes the same gates in the same order, so a rejection
/// never tells the caller more than it is entitled to know:
///
/// 1. resolve the path (`UnknownResource`)
/// 2. session requirement (`SessionRequired`), before any lookup
/// 3. fetch the instance (`NotFound`)
/// 4. visibility (`NotFound`, indistinguishable from step 3)
/// 5. the operation's own checks (`Forbidden`)
/// 6. field and function names (`UnknownField`, `UnknownFunction`)
/// 7. serve, delegating to persistence or the function dispatcher
///
/// The orchestrator holds no per-request state; share one instance (for
/// example behind an `Arc`) across all concurrent requests. Decisions are
/// recomputed for every request.
///
/// Each call gets a fresh request id, recorded on its `resource_request`
/// tracing span and attached to any error it returns.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use resource_access::dispatch::FunctionTable;
/// use resource_access::orchestrator::RequestOrchestrator;
/// use resource_access::policy::RulePolicy;
/// use resource_access::registry::{ResourceRegistry, ResourceTypeDescriptor};
/// use resource_access::testing::InMemoryStore;
/// use resource_access::{AttributeValue, ErrorKind, Principal, ResourceInstance};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut registry = ResourceRegistry::new();
/// registry
///     .register(
///         ResourceTypeDescriptor::new("note", "id").with_attribute("text"),
///         RulePolicy::new().visible_when(|p, note| note.relates_to("owner", p.user_id().unwrap_or(-1))),
///         FunctionTable::new(),
///     )
///     .unwrap();
///
/// let store = InMemoryStore::new();
/// store.insert(ResourceInstance::new("note", 1).with_attribute("text", "hi").with_relationship("owner", vec![7]));
///
/// let orchestrator = RequestOrchestrator::new(Arc::new(registry), Arc::new(store));
/// let note = orchestrator.read("note", &Principal::user_only(7), 1, None).await.unwrap();
/// assert_eq!(note.attributes["text"], AttributeValue::from("hi"));
///
/// let err = orchestrator.read("note", &Principal::user_only(8), 1, None).await.unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// # }
/// ```
pub struct RequestOrchestrator {
    registry: Arc<ResourceRegistry>,
    store: Arc<dyn Persistence>,
    dispatcher: FunctionDispatcher,
    config: OrchestratorConfig,
}

/// The parts of one request every step needs.
struct Scope<'a> {
    request_id: &'a str,
    principal: &'a Principal,
    resource_type: &'a RegisteredType,
}

impl RequestOrchestrator {
    /// Creates an orchestrator with the default configuration.
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<dyn Persistence>) -> Self {
        Self::with_config(registry, store, OrchestratorConfig::default())
    }

    /// Creates an orchestrator with an explicit configuration.
    pub fn with_config(
        registry: Arc<ResourceRegistry>,
        store: Arc<dyn Persistence>,
        config: OrchestratorConfig,
    ) -> Self {
        Self { registry, store, dispatcher: FunctionDispatcher::new(), config }
    }

    /// Returns the registry requests are resolved against.
    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Serves a logical [`Request`].
    ///
    /// # Errors
    ///
    /// Whatever the operation-specific method returns.
    pub async fn handle(&self, request: Request) -> Result<Response> {
        let Request { path, principal, operation } = request;
        match operation {
            Operation::Create { fields } => {
                self.create(&path, &principal, fields).await.map(|id| Response::Created { id })
            },
            Operation::Read { id, fields } => {
                self.read(&path, &principal, id, fields.as_deref()).await.map(Response::Read)
            },
            Operation::Update { id, fields } => {
                self.update(&path, &principal, id, fields).await.map(|()| Response::Updated)
            },
            Operation::Delete { id } => self.delete(&path, &principal, id).await.map(|()| Response::Deleted),
            Operation::Invoke { id, function, payload } => self
                .invoke(&path, &principal, id, &function, payload.as_ref())
                .await
                .map(Response::Function),
        }
    }

    /// Creates a new instance and returns its identifier.
    ///
    /// # Errors
    ///
    /// `UnknownResource`, `SessionRequired`, `Forbidden` when creation is not
    /// permitted or the identifier key is written, `UnknownField`,
    /// `InvalidArgument`, or the store's error.
    pub async fn create(&self, path: &str, principal: &Principal, fields: WriteSet) -> Result<ResourceId> {
        let request_id = new_request_id();
        self.run(&request_id, path, "create", self.create_in_scope(&request_id, path, principal, fields)).await
    }

    async fn create_in_scope(
        &self,
        request_id: &str,
        path: &str,
        principal: &Principal,
        fields: WriteSet,
    ) -> Result<ResourceId> {
        let scope = self.admit(request_id, path, principal)?;
        self.check_field_count(fields.len())?;
        let descriptor = scope.resource_type.descriptor();

        if !scope.resource_type.evaluator().can_create(principal) {
            let target = descriptor.path().to_owned();
            return Err(self.forbid(&scope, Access::Create, target, "creation not permitted"));
        }
        let fields = into_write_set(check_write_set(descriptor, fields)?);
        tracing::debug!(phase = %RequestPhase::Authorized, fields = fields.len(), "create authorized");

        let instance = self
            .store
            .create(descriptor, principal, &fields)
            .await
            .inspect_err(|err| log_store_failure("create", err))?;
        Ok(instance.id())
    }

    /// Reads the visible fields of an instance.
    ///
    /// With `fields = None` every attribute is considered, and every
    /// relationship too when
    /// [`include_relationships`](OrchestratorConfig::include_relationships)
    /// is set. Fields the principal may not see are silently left out.
    ///
    /// # Errors
    ///
    /// `UnknownResource`, `SessionRequired`, `NotFound` for missing or
    /// invisible instances, `UnknownField` for an explicitly requested
    /// undeclared name, `InvalidArgument`, or the store's error.
    pub async fn read(
        &self,
        path: &str,
        principal: &Principal,
        id: ResourceId,
        fields: Option<&[String]>,
    ) -> Result<ReadResponse> {
        let request_id = new_request_id();
        self.run(&request_id, path, "read", self.read_in_scope(&request_id, path, principal, id, fields)).await
    }

    async fn read_in_scope(
        &self,
        request_id: &str,
        path: &str,
        principal: &Principal,
        id: ResourceId,
        fields: Option<&[String]>,
    ) -> Result<ReadResponse> {
        let scope = self.admit(request_id, path, principal)?;
        if let Some(fields) = fields {
            self.check_field_count(fields.len())?;
        }
        let instance = self.fetch_visible(&scope, id).await?;
        let descriptor = scope.resource_type.descriptor();
        let schema = descriptor.schema();

        let requested: Vec<(String, FieldKind)> = match fields {
            Some(names) => names
                .iter()
                .map(|name| {
                    schema
                        .field_kind(name)
                        .map(|kind| (name.clone(), kind))
                        .ok_or_else(|| Error::unknown_field(descriptor.path(), name))
                })
                .collect::<Result<_>>()?,
            None => {
                let attributes = schema.attributes().map(|name| (name.to_owned(), FieldKind::Attribute));
                let relationships = schema
                    .relationships()
                    .filter(|_| self.config.include_relationships)
                    .map(|(name, cardinality)| (name.to_owned(), FieldKind::Relationship(cardinality)));
                attributes.chain(relationships).collect()
            },
        };
        tracing::debug!(phase = %RequestPhase::Authorized, fields = requested.len(), "read authorized");

        let evaluator = scope.resource_type.evaluator();
        let mut response = ReadResponse::new(instance.id());
        for (name, kind) in requested {
            if evaluator.decide_field(Access::View, principal, &instance, kind, &name).is_denied() {
                continue;
            }
            match kind {
                FieldKind::Attribute => {
                    let value = if name == descriptor.identifier_key() {
                        AttributeValue::Integer(instance.id())
                    } else {
                        instance.attribute(&name).cloned().unwrap_or_default()
                    };
                    response.attributes.insert(name, value);
                },
                FieldKind::Relationship(_) => {
                    let targets = self
                        .store
                        .resolve_relationship_targets(&instance, &name)
                        .await
                        .inspect_err(|err| log_store_failure("resolve_relationship_targets", err))?;
                    response.relationships.insert(name, targets);
                },
            }
        }
        Ok(response)
    }

    /// Applies a write set to an instance, all fields or none.
    ///
    /// The store's `apply_write` is called at most once, and only after the
    /// resource and every field in the set passed the edit checks.
    ///
    /// # Errors
    ///
    /// `UnknownResource`, `SessionRequired`, `NotFound`, `Forbidden` when the
    /// instance or any single field is not editable, `UnknownField`,
    /// `InvalidArgument`, or the store's error.
    pub async fn update(&self, path: &str, principal: &Principal, id: ResourceId, fields: WriteSet) -> Result<()> {
        let request_id = new_request_id();
        self.run(&request_id, path, "update", self.update_in_scope(&request_id, path, principal, id, fields)).await
    }

    async fn update_in_scope(
        &self,
        request_id: &str,
        path: &str,
        principal: &Principal,
        id: ResourceId,
        fields: WriteSet,
    ) -> Result<()> {
        let scope = self.admit(request_id, path, principal)?;
        self.check_field_count(fields.len())?;
        let instance = self.fetch_visible(&scope, id).await?;
        let evaluator = scope.resource_type.evaluator();

        if !evaluator.is_editable(principal, &instance) {
            let target = instance.reference().to_string();
            return Err(self.forbid(&scope, Access::Edit, target, "resource not editable"));
        }

        let checked = check_write_set(scope.resource_type.descriptor(), fields)?;
        let denied = checked.iter().find(|field| {
            evaluator.decide_field(Access::Edit, principal, &instance, field.kind, &field.name).is_denied()
        });
        if let Some(field) = denied {
            let target = instance.reference().field(&field.name);
            return Err(self.forbid(&scope, Access::Edit, target, "field not editable"));
        }
        tracing::debug!(phase = %RequestPhase::Authorized, fields = checked.len(), "update authorized");

        if checked.is_empty() {
            return Ok(());
        }
        let fields = into_write_set(checked);
        self.store
            .apply_write(&instance, &fields)
            .await
            .inspect_err(|err| log_store_failure("apply_write", err))
    }

    /// Deletes an instance the principal can see and edit.
    ///
    /// # Errors
    ///
    /// `UnknownResource`, `SessionRequired`, `NotFound`, `Forbidden`, or the
    /// store's error.
    pub async fn delete(&self, path: &str, principal: &Principal, id: ResourceId) -> Result<()> {
        let request_id = new_request_id();
        self.run(&request_id, path, "delete", self.delete_in_scope(&request_id, path, principal, id)).await
    }

    async fn delete_in_scope(&self, request_id: &str, path: &str, principal: &Principal, id: ResourceId) -> Result<()> {
        let scope = self.admit(request_id, path, principal)?;
        let instance = self.fetch_visible(&scope, id).await?;

        if !scope.resource_type.evaluator().is_editable(principal, &instance) {
            let target = instance.reference().to_string();
            return Err(self.forbid(&scope, Access::Edit, target, "resource not editable"));
        }
        tracing::debug!(phase = %RequestPhase::Authorized, "delete authorized");

        self.store.delete(&instance).await.inspect_err(|err| log_store_failure("delete", err))
    }

    /// Invokes a declared function on a visible instance.
    ///
    /// Functions do their own authorization beyond visibility; the result
    /// is returned exactly as the handler produced it.
    ///
    /// # Errors
    ///
    /// `UnknownResource`, `SessionRequired`, `NotFound`, `UnknownFunction`,
    /// `HandlerFailure`, or the store's error.
    pub async fn invoke(
        &self,
        path: &str,
        principal: &Principal,
        id: ResourceId,
        function: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<FunctionResult> {
        let request_id = new_request_id();
        self.run(&request_id, path, "invoke", self.invoke_in_scope(&request_id, path, principal, id, function, payload))
            .await
    }

    async fn invoke_in_scope(
        &self,
        request_id: &str,
        path: &str,
        principal: &Principal,
        id: ResourceId,
        function: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<FunctionResult> {
        let scope = self.admit(request_id, path, principal)?;
        let instance = self.fetch_visible(&scope, id).await?;
        tracing::debug!(phase = %RequestPhase::Authorized, function, "invoke authorized");

        self.dispatcher.dispatch(scope.resource_type, function, principal, &instance, payload).await
    }

    /// Runs one request inside its tracing span and stamps the request id
    /// on any error.
    async fn run<T>(
        &self,
        request_id: &str,
        path: &str,
        operation: &'static str,
        work: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let span = tracing::info_span!("resource_request", request_id, path, operation);
        async move {
            tracing::debug!(phase = %RequestPhase::Received, "request received");
            match work.await {
                Ok(value) => {
                    tracing::debug!(phase = %RequestPhase::Served, "request served");
                    Ok(value)
                },
                Err(err) => {
                    tracing::debug!(
                        phase = %RequestPhase::Rejected(err.kind()),
                        error = err.message(),
                        "request rejected"
                    );
                    Err(err.with_request_id(request_id))
                },
            }
        }
        .instrument(span)
        .await
    }

    /// Resolves the type and enforces its session requirement.
    fn admit<'a>(&'a self, request_id: &'a str, path: &str, principal: &'a Principal) -> Result<Scope<'a>> {
        let resource_type = self.registry.resolve(path)?;
        if resource_type.descriptor().requires_session() && !principal.has_session() {
            return Err(Error::session_required());
        }
        tracing::debug!(phase = %RequestPhase::SessionChecked, "session checked");
        Ok(Scope { request_id, principal, resource_type })
    }

    /// Fetches an instance and hides it unless the principal can see it.
    async fn fetch_visible(&self, scope: &Scope<'_>, id: ResourceId) -> Result<ResourceInstance> {
        let descriptor = scope.resource_type.descriptor();
        let reference = InstanceRef::new(descriptor.path(), id);

        let Some(instance) =
            self.store.fetch(descriptor, id).await.inspect_err(|err| log_store_failure("fetch", err))?
        else {
            return Err(Error::not_found(&reference));
        };
        if !scope.resource_type.evaluator().is_visible(scope.principal, &instance) {
            self.log_denial(&denial(scope, Access::View, reference.to_string(), "resource not visible"));
            return Err(Error::not_found(&reference));
        }
        Ok(instance)
    }

    fn check_field_count(&self, count: usize) -> Result<()> {
        if self.config.accepts_field_count(count) {
            return Ok(());
        }
        Err(Error::invalid_argument(format!(
            "request names {} fields, the limit is {}",
            count, self.config.max_fields
        )))
    }

    /// Logs a denial and turns it into a `Forbidden` error.
    fn forbid(&self, scope: &Scope<'_>, access: Access, target: String, reason: &'static str) -> Error {
        let denied = denial(scope, access, target, reason);
        self.log_denial(&denied);
        denied.into()
    }

    fn log_denial(&self, denied: &AccessDenied) {
        if self.config.log_denials {
            tracing::info!("{}", denied.to_log_string());
        }
    }
}

/// Builds the denial record for `scope`.
fn denial(scope: &Scope<'_>, access: Access, target: String, reason: &'static str) -> AccessDenied {
    AccessDenied::new(scope.principal.to_string(), access.as_str(), target)
        .with_reason(reason)
        .with_request_id(scope.request_id)
}

impl fmt::Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("registry", &self.registry.paths())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

fn log_store_failure(operation: &'static str, err: &Error) {
    tracing::warn!(operation, kind = ?err.kind(), error = err.message(), "persistence call failed");
}
