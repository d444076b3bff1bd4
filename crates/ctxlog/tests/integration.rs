//! Integration tests for binding, resolution and enrichment working together.
//!
//! Every test owns its `DefaultLogger` or binds a logger to its context, so
//! nothing here depends on the process-wide default. See `global_default.rs`
//! for the global holder.

use std::fmt;
use std::sync::Arc;

use ctxlog::prelude::*;
use ctxlog::testing::TestLogger;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, PartialEq, Clone, Copy)]
enum RequestKey {
    Id,
    User,
    Route,
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestKey::Id => "request_id",
            RequestKey::User => "user",
            RequestKey::Route => "route",
        })
    }
}

#[derive(Debug, Serialize)]
struct Route {
    method: &'static str,
    path: &'static str,
}

// ============================================================================
// Request flow
// ============================================================================

fn load_profile(ctx: &Context, holder: &DefaultLogger) {
    let log = holder.logger(ctx, &[&RequestKey::Id, &RequestKey::User]);
    ctx_debug!(log, "loading profile");
}

fn save_profile(ctx: &Context, holder: &DefaultLogger) {
    let log = holder.logger_with_field(ctx, "table", "profiles", &[&RequestKey::Id]);
    log.with_error(&std::io::Error::other("disk full"))
        .error("save failed");
}

#[test]
fn test_request_chain_sees_request_fields() {
    let test = TestLogger::new();
    let holder = DefaultLogger::default();

    let ctx = Context::background()
        .with_value(RequestKey::Id, "r-100")
        .with_value(RequestKey::User, "alice")
        .with_logger(test.entry().with_field("service", "profiles"));

    load_profile(&ctx, &holder);
    save_profile(&ctx, &holder);

    let records = test.records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].level, Level::Debug);
    assert_eq!(
        serde_json::to_value(&records[0].fields).unwrap(),
        json!({"service": "profiles", "request_id": "r-100", "user": "alice"})
    );

    assert_eq!(records[1].level, Level::Error);
    assert_eq!(records[1].message, "save failed");
    assert_eq!(
        serde_json::to_value(&records[1].fields).unwrap(),
        json!({
            "service": "profiles",
            "request_id": "r-100",
            "table": "profiles",
            "error": "disk full"
        })
    );
}

#[test]
fn test_unbound_request_uses_holder_default() {
    let test = TestLogger::new();
    let holder = DefaultLogger::new(test.entry().with_field("service", "fallback"));
    let ctx = Context::background().with_value(RequestKey::Id, "r-7");

    load_profile(&ctx, &holder);

    let record = test.last().unwrap();
    assert_eq!(record.fields["service"], json!("fallback"));
    assert_eq!(record.fields["request_id"], json!("r-7"));
    assert!(!record.fields.contains_key("user"));
}

#[test]
fn test_structured_context_values_become_json_fields() {
    let test = TestLogger::new();
    let holder = DefaultLogger::new(test.entry());
    let ctx = Context::background().with_value(
        RequestKey::Route,
        Route {
            method: "GET",
            path: "/users/7",
        },
    );

    holder.logger(&ctx, &[&RequestKey::Route]).info("routed");

    assert_eq!(
        test.last().unwrap().fields["route"],
        json!({"method": "GET", "path": "/users/7"})
    );
}

#[test]
fn test_opaque_context_values_are_not_logged() {
    struct DbPool;

    let test = TestLogger::new();
    let holder = DefaultLogger::new(test.entry());
    let ctx = Context::background().with_opaque("db", Arc::new(DbPool));

    holder.logger(&ctx, &[&"db"]).info("query");

    assert!(test.last().unwrap().fields.is_empty());
    assert!(ctx.contains(&"db"));
    assert!(ctx.value::<Arc<DbPool>>(&"db").is_some());
}

// ============================================================================
// Shadowing across branches
// ============================================================================

#[test]
fn test_sibling_branches_keep_their_own_loggers() {
    let root_test = TestLogger::new();
    let left_test = TestLogger::new();
    let holder = DefaultLogger::default();

    let root = Context::background().with_logger(root_test.entry());
    let left = root.with_logger(left_test.entry()).with_value("branch", "left");
    let right = root.with_value("branch", "right");

    holder.logger(&left, &[&"branch"]).info("left");
    holder.logger(&right, &[&"branch"]).info("right");
    holder.logger(&root, &[&"branch"]).info("root");

    assert_eq!(left_test.messages(), vec!["left"]);
    assert_eq!(root_test.messages(), vec!["right", "root"]);
    assert_eq!(root_test.records()[0].fields["branch"], json!("right"));
    assert!(root_test.records()[1].fields.is_empty());
}

#[test]
fn test_enrichment_does_not_leak_into_later_resolution() {
    let test = TestLogger::new();
    let holder = DefaultLogger::default();
    let ctx = Context::background().with_logger(test.entry());

    let enriched = holder.logger_with_fields(&ctx, [("a", 1), ("b", 2)], &[]);
    assert_eq!(enriched.fields().len(), 2);

    let again = holder.resolve(&ctx);
    assert!(again.fields().is_empty());
    assert!(again.same_as(&test.entry()));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_threads_share_context_and_swap_default() {
    let before = TestLogger::new();
    let after = TestLogger::new();
    let holder = DefaultLogger::new(before.entry());
    let ctx = Context::background().with_value(RequestKey::Id, "shared");

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let ctx = ctx.clone();
            let holder = &holder;
            scope.spawn(move || {
                for i in 0..50 {
                    let log = holder.logger_with_field(&ctx, "worker", worker, &[&RequestKey::Id]);
                    ctx_trace!(log, "tick {}", i);
                }
            });
        }
        scope.spawn(|| {
            holder.set(&after.entry());
        });
    });

    let total = before.records().len() + after.records().len();
    assert_eq!(total, 200);
    for record in before.records().into_iter().chain(after.records()) {
        assert_eq!(record.fields["request_id"], json!("shared"));
        assert!(record.fields.contains_key("worker"));
    }
    assert!(holder.get().same_as(&after.entry()));
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_macros_format_at_their_level() {
    let test = TestLogger::new();
    let log = test.entry();

    ctx_trace!(log, "t{}", 1);
    ctx_debug!(log, "d{}", 2);
    ctx_info!(log, "i{}", 3);
    ctx_warn!(log, "w{}", 4);
    ctx_error!(log, "e{}", 5);
    ctx_log!(&log, Level::Info, "explicit {}", "level");

    let levels: Vec<Level> = test.records().iter().map(|r| r.level).collect();
    assert_eq!(
        levels,
        vec![
            Level::Trace,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Info
        ]
    );
    assert_eq!(
        test.messages(),
        vec!["t1", "d2", "i3", "w4", "e5", "explicit level"]
    );
}
