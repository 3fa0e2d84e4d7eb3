//! Registration rules and evaluator invariants over every registered type.

use std::sync::Arc;

use proptest::prelude::*;
use resource_access::dispatch::FunctionTable;
use resource_access::policy::RulePolicy;
use resource_access::registry::{ResourceRegistry, ResourceTypeDescriptor};
use resource_access::testing::{AllowAll, DenyAll, InMemoryStore, RecordingHandler};
use resource_access::{ErrorKind, FunctionResult, Principal, ResourceId, ResourceInstance};

use crate::common::{self, ALICE, BOB};

fn seeded_registry() -> ResourceRegistry {
    common::registry(Arc::new(InMemoryStore::new()), RecordingHandler::new(FunctionResult::no_content()))
}

#[test]
fn test_duplicate_path_keeps_first_registration() {
    let mut registry = seeded_registry();

    let replacement = ResourceTypeDescriptor::new("post", "id").with_attribute("text");
    let err = registry.register(replacement, DenyAll, FunctionTable::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicatePath);
    let post = registry.resolve("post").unwrap();
    assert!(post.descriptor().declares_function("like"));
    let public = ResourceInstance::new("post", 1).with_attribute("visibility", "public");
    assert!(post.evaluator().is_visible(&BOB, &public));
}

#[test]
fn test_paths_are_sorted() {
    let registry = seeded_registry();

    assert_eq!(registry.paths(), vec!["draft", "post", "user"]);
    assert_eq!(registry.len(), 3);
    assert!(registry.contains("user"));
    assert_eq!(registry.resolve("comment").unwrap_err().kind(), ErrorKind::UnknownResource);
}

#[test]
fn test_declared_function_without_handler_is_rejected() {
    let mut registry = ResourceRegistry::new();
    let descriptor = ResourceTypeDescriptor::new("comment", "id").with_function("flag");

    let err = registry.register(descriptor, AllowAll, FunctionTable::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(registry.is_empty());
}

#[test]
fn test_handler_without_declaration_is_rejected() {
    let mut registry = ResourceRegistry::new();
    let functions = FunctionTable::new().with_handler("flag", RecordingHandler::new(FunctionResult::no_content()));

    let err = registry.register(ResourceTypeDescriptor::new("comment", "id"), AllowAll, functions).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_invalid_descriptor_is_rejected() {
    let mut registry = ResourceRegistry::new();
    let descriptor = ResourceTypeDescriptor::new("comment", "id").with_attribute("body").with_to_one("body");

    let err = registry.register(descriptor, RulePolicy::allow_all(), FunctionTable::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_field_rules_cannot_widen_resource_rules() {
    let registry = seeded_registry();
    let draft = registry.resolve("draft").unwrap();
    let instance = ResourceInstance::new("draft", 1).with_attribute("text", "x");

    // DenyAll refuses at resource level, so no field answer can get through.
    assert!(!draft.evaluator().attribute_is_visible(&ALICE, &instance, "text"));
    assert!(!draft.evaluator().attribute_is_editable(&ALICE, &instance, "text"));
}

fn principal() -> impl Strategy<Value = Principal> {
    (proptest::option::of(1..6_i64), proptest::option::of(100..103_i64)).prop_map(|(user, client)| {
        match (user, client) {
            (Some(user), Some(client)) => Principal::authenticated(user, client),
            (Some(user), None) => Principal::user_only(user),
            (None, Some(client)) => Principal::client_only(client),
            (None, None) => Principal::unauthenticated(),
        }
    })
}

/// Random field contents shared by every type; unknown names are ignored by policies.
fn contents() -> impl Strategy<Value = (ResourceId, bool, Vec<ResourceId>, Vec<ResourceId>)> {
    (1..6_i64, any::<bool>(), proptest::collection::vec(1..6_i64, 0..2), proptest::collection::vec(1..6_i64, 0..4))
}

proptest! {
    #[test]
    fn prop_field_access_implies_resource_access(
        principal in principal(),
        (id, private, author, others) in contents(),
    ) {
        let registry = seeded_registry();

        for resource_type in registry.iter() {
            let descriptor = resource_type.descriptor();
            let evaluator = resource_type.evaluator();
            let instance = ResourceInstance::new(descriptor.path(), id)
                .with_attribute("visibility", if private { "private" } else { "public" })
                .with_relationship("author", author.clone())
                .with_relationship("likedBy", others.clone())
                .with_relationship("friends", others.clone());

            let visible = evaluator.is_visible(&principal, &instance);
            let editable = evaluator.is_editable(&principal, &instance);

            for name in descriptor.schema().attributes() {
                prop_assert!(!evaluator.attribute_is_visible(&principal, &instance, name) || visible);
                prop_assert!(!evaluator.attribute_is_editable(&principal, &instance, name) || editable);
            }
            for (name, _) in descriptor.schema().relationships() {
                prop_assert!(!evaluator.relationship_is_visible(&principal, &instance, name) || visible);
                prop_assert!(!evaluator.relationship_is_editable(&principal, &instance, name) || editable);
            }
        }
    }
}
