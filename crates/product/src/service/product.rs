use crate::{
    abstract_trait::product::{mapper::DynProductMapper, repository::DynProductStore},
    domain::response::api::ApiResponse,
};
use chrono::{NaiveDateTime, SubsecRound, Utc};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductService {
    pub store: DynProductStore,
    pub mapper: DynProductMapper,
    pub metrics: Metrics,
}

impl ProductService {
    pub fn new(store: DynProductStore, mapper: DynProductMapper, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_service", "product service");

        Self {
            store,
            mapper,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-service")
    }

    pub(crate) fn start_tracing(
        &self,
        operation_name: &str,
        attributes: Vec<KeyValue>,
    ) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    /// Closes the span and records metrics from the operation outcome. An
    /// envelope with `is_success == false` counts as an error.
    pub(crate) async fn complete_tracing<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: &Result<ApiResponse<T>, ServiceError>,
        success_message: &str,
    ) {
        match result {
            Ok(res) if res.is_success => {
                self.complete_tracing_internal(tracing_ctx, method, true, success_message)
                    .await;
            }
            Ok(res) => {
                let message = res.exception_message.as_deref().unwrap_or("Not found");
                self.complete_tracing_internal(tracing_ctx, method, false, message)
                    .await;
            }
            Err(e) => {
                self.complete_tracing_internal(tracing_ctx, method, false, &e.to_string())
                    .await;
            }
        }
    }

    async fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

/// Current time at the precision Postgres stores.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

pub(crate) fn user_not_found(id: i32) -> String {
    format!("User with id:{id} is not found")
}

pub(crate) fn category_not_found(id: i32) -> String {
    format!("Category with id:{id} is not found")
}

pub(crate) fn product_not_found(id: i32) -> String {
    format!("Product with id:{id} is not found")
}
