//! Common test harness for resource-access integration tests.
//!
//! Provides a seeded social-network fixture: posts with per-field rules and
//! functions, users that need no session, and drafts nobody may touch.

use std::sync::{Arc, OnceLock};

use resource_access::config::OrchestratorConfig;
use resource_access::dispatch::{FunctionContext, FunctionTable, HandlerError};
use resource_access::policy::RulePolicy;
use resource_access::registry::{ResourceRegistry, ResourceTypeDescriptor};
use resource_access::testing::{DenyAll, InMemoryStore, RecordingHandler};
use resource_access::{FunctionResult, Principal, RequestOrchestrator, ResourceId, ResourceInstance};
use serde_json::json;

/// Alice, the author of every seeded post.
pub const ALICE: Principal = Principal::authenticated(1, 100);

/// Bob, a friend of Alice.
pub const BOB: Principal = Principal::authenticated(2, 100);

/// An application acting without a user.
pub const APP: Principal = Principal::client_only(100);

/// No session at all.
pub const ANONYMOUS: Principal = Principal::unauthenticated();

/// Alice's public post.
pub const PUBLIC_POST: ResourceId = 10;

/// Alice's private post.
pub const PRIVATE_POST: ResourceId = 11;

/// A draft nobody can see.
pub const DRAFT: ResourceId = 20;

/// An identifier nothing is stored under.
pub const MISSING: ResourceId = 999;

/// Install a tracing subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn is_author(principal: &Principal, post: &ResourceInstance) -> bool {
    principal.user_id().is_some_and(|user| post.relates_to("author", user))
}

fn is_private(post: &ResourceInstance) -> bool {
    post.attribute("visibility").and_then(|value| value.as_str()) == Some("private")
}

/// The `post` type: session required, author-only edits, `likeCount`
/// changed only through the `like` function.
pub fn post_descriptor() -> ResourceTypeDescriptor {
    ResourceTypeDescriptor::new("post", "id")
        .with_session_required(true)
        .with_attributes(["text", "likeCount", "visibility"])
        .with_to_one("author")
        .with_to_many("likedBy")
        .with_function("like")
        .with_function("report")
        .with_function("purge")
        .with_function("pin")
}

pub fn post_policy() -> RulePolicy {
    RulePolicy::new()
        .create_when(|principal| principal.user_id().is_some())
        .visible_when(|principal, post| !is_private(post) || is_author(principal, post))
        .editable_when(is_author)
        .attribute_editable_when(|_, _, name| name != "likeCount")
        .relationship_visible_when(|principal, post, name| name != "likedBy" || is_author(principal, post))
        .relationship_editable_when(|_, _, name| name != "author")
}

/// Function handlers for `post`.
///
/// `like` increments `likeCount` in `store` and answers `(200, {likeCount})`;
/// `report` is recorded; `purge` always errors; `pin` answers 409.
pub fn post_functions(store: Arc<InMemoryStore>, report: RecordingHandler) -> FunctionTable {
    FunctionTable::new()
        .with_fn("like", move |ctx: FunctionContext| {
            let store = Arc::clone(&store);
            async move {
                let Some(user) = ctx.principal.user_id() else {
                    return Ok(FunctionResult::new(403, Some(json!({"error": "only users can like posts"}))));
                };
                let likes = ctx.instance.attribute("likeCount").and_then(|value| value.as_i64()).unwrap_or(0) + 1;
                let mut liked_by = ctx.instance.relationship("likedBy").map(<[ResourceId]>::to_vec).unwrap_or_default();
                liked_by.push(user);
                store.insert(ctx.instance.with_attribute("likeCount", likes).with_relationship("likedBy", liked_by));
                Ok(FunctionResult::ok(json!({ "likeCount": likes })))
            }
        })
        .with_handler("report", report)
        .with_fn("purge", |_ctx: FunctionContext| async move {
            Err::<FunctionResult, HandlerError>("moderation queue offline".into())
        })
        .with_fn("pin", |_ctx: FunctionContext| async move {
            Ok(FunctionResult::new(409, Some(json!({"error": "already pinned"}))))
        })
}

/// The `user` type: no session needed, email visible to its owner only.
pub fn user_descriptor() -> ResourceTypeDescriptor {
    ResourceTypeDescriptor::new("user", "userID").with_attributes(["name", "email"]).with_to_many("friends")
}

pub fn user_policy() -> RulePolicy {
    RulePolicy::new()
        .create_when(|principal| principal.client_id().is_some())
        .visible_when(|_, _| true)
        .editable_when(|principal, user| principal.is_user(user.id()))
        .attribute_visible_when(|principal, user, name| name != "email" || principal.is_user(user.id()))
}

/// The `draft` type: session required, everything denied.
pub fn draft_descriptor() -> ResourceTypeDescriptor {
    ResourceTypeDescriptor::new("draft", "id").with_session_required(true).with_attribute("text")
}

/// Registers `post`, `user` and `draft`.
pub fn registry(store: Arc<InMemoryStore>, report: RecordingHandler) -> ResourceRegistry {
    registry_with_post_policy(store, report, post_policy())
}

/// Like [`registry`], with `post` governed by `policy`.
pub fn registry_with_post_policy(
    store: Arc<InMemoryStore>,
    report: RecordingHandler,
    policy: RulePolicy,
) -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    registry.register(post_descriptor(), policy, post_functions(store, report)).expect("register post");
    registry.register(user_descriptor(), user_policy(), FunctionTable::new()).expect("register user");
    registry.register(draft_descriptor(), DenyAll, FunctionTable::new()).expect("register draft");
    registry
}

fn seed(store: &InMemoryStore) {
    store.insert(
        ResourceInstance::new("user", 1)
            .with_attribute("name", "alice")
            .with_attribute("email", "alice@example.com")
            .with_relationship("friends", vec![2]),
    );
    store.insert(
        ResourceInstance::new("user", 2)
            .with_attribute("name", "bob")
            .with_attribute("email", "bob@example.com")
            .with_relationship("friends", vec![1]),
    );
    store.insert(
        ResourceInstance::new("post", PUBLIC_POST)
            .with_attribute("text", "hello world")
            .with_attribute("likeCount", 3)
            .with_attribute("visibility", "public")
            .with_relationship("author", vec![1])
            .with_relationship("likedBy", vec![3, 4, 5]),
    );
    store.insert(
        ResourceInstance::new("post", PRIVATE_POST)
            .with_attribute("text", "secret plans")
            .with_attribute("likeCount", 0)
            .with_attribute("visibility", "private")
            .with_relationship("author", vec![1]),
    );
    store.insert(ResourceInstance::new("draft", DRAFT).with_attribute("text", "unfinished"));
}

/// A seeded orchestrator with handles on its collaborators.
pub struct TestFixture {
    pub orchestrator: Arc<RequestOrchestrator>,
    pub store: Arc<InMemoryStore>,
    pub report: RecordingHandler,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_config(OrchestratorConfig::default())
    }

    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self::build(config, post_policy())
    }

    /// A fixture whose `post` type uses `policy` instead of [`post_policy`].
    pub fn with_post_policy(policy: RulePolicy) -> Self {
        Self::build(OrchestratorConfig::default(), policy)
    }

    fn build(config: OrchestratorConfig, post_policy: RulePolicy) -> Self {
        init_tracing();
        let store = Arc::new(InMemoryStore::new());
        seed(&store);
        let report = RecordingHandler::new(FunctionResult::new(202, Some(json!({"queued": true}))));
        let registry = Arc::new(registry_with_post_policy(Arc::clone(&store), report.clone(), post_policy));
        let orchestrator = Arc::new(RequestOrchestrator::with_config(registry, store.clone(), config));
        Self { orchestrator, store, report }
    }

    /// Returns the stored copy of an instance.
    pub fn stored(&self, path: &str, id: ResourceId) -> ResourceInstance {
        self.store.get(path, id).expect("instance should be stored")
    }
}
