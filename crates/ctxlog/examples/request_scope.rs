//! Example: Request Scope
//!
//! Binds a logger at "request entry", then logs from nested handlers that
//! only see the context.
//!
//! Run with:
//! ```bash
//! cargo run --example request_scope
//! CTXLOG_FIELDS="service=demo,env=dev" cargo run --example request_scope
//! ```

use std::fmt::Write as _;

use ctxlog::prelude::*;
use log::kv::{self, Key, Value, VisitSource};
use log::{LevelFilter, Log, Metadata, Record};

// ============================================================================
// Backend
// ============================================================================

/// Minimal `log` backend printing `LEVEL target: message key=value ...`.
struct StderrLogger;

struct Pairs(String);

impl<'kvs> VisitSource<'kvs> for Pairs {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        let _ = write!(self.0, " {key}={value}");
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut pairs = Pairs(String::new());
        let _ = record.key_values().visit(&mut pairs);
        eprintln!(
            "{:<5} {}: {}{}",
            record.level(),
            record.target(),
            record.args(),
            pairs.0
        );
    }

    fn flush(&self) {}
}

static BACKEND: StderrLogger = StderrLogger;

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, PartialEq)]
enum RequestKey {
    RequestId,
    User,
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RequestKey::RequestId => "request_id",
            RequestKey::User => "user",
        })
    }
}

fn authorize(ctx: &Context) -> bool {
    let entry = ctx.logger(&[&RequestKey::RequestId, &RequestKey::User]);
    ctx_debug!(entry, "checking permissions");
    true
}

fn fetch_orders(ctx: &Context, limit: u32) -> Vec<u32> {
    let entry = ctxlog::logger_with_field(ctx, "limit", limit, &[&RequestKey::RequestId]);
    let orders: Vec<u32> = (1..=limit).collect();
    ctx_info!(entry, "fetched {} orders", orders.len());
    orders
}

fn handle_request(ctx: &Context) {
    if !authorize(ctx) {
        return;
    }
    let orders = fetch_orders(ctx, 3);
    if orders.len() < 5 {
        let err = std::io::Error::other("partial page");
        ctx.logger(&[&RequestKey::RequestId])
            .with_error(&err)
            .warn("short result");
    }
}

fn main() {
    if log::set_logger(&BACKEND).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }

    // Without a bound logger, the default built from CTXLOG_* is used.
    let background = Context::background().with_value(RequestKey::RequestId, "startup");
    ctxlog::logger(&background, &[&RequestKey::RequestId]).info("service starting");

    // Request entry: bind once, with the fields every line should carry.
    for (id, user) in [("r-1", "alice"), ("r-2", "bob")] {
        let ctx = Context::background()
            .with_value(RequestKey::RequestId, id)
            .with_value(RequestKey::User, user)
            .with_logger(ctxlog::default_logger().with_field("component", "orders"));
        handle_request(&ctx);
    }

    // Swap the process-wide default; later unbound lookups pick it up.
    ctxlog::set_default(&ctxlog::default_logger().with_field("phase", "shutdown"));
    ctxlog::logger(&background, &[]).info("service stopping");
}
