//! Retrying invocation of raw remote calls.
//!
//! A [`WrappedMethod`] binds an operation name to its default retry policy
//! and timeout. Transports build one per operation at construction time;
//! clients run every call through it.

use std::future::Future;
use std::time::Duration;

use tonic::Status;
use tracing::Instrument;

use crate::error::ClientError;
use crate::retry::{CallOptions, RetryPolicy, calculate_backoff};
use crate::routing::{RoutingParams, append_routing_header};

fn duration_to_i64_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// What a single attempt hands to the raw call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Caller metadata followed by the routing entry.
    pub metadata: Vec<(String, String)>,
    /// Deadline for this attempt.
    pub timeout: Option<Duration>,
}

/// An operation bound to its default retry policy and timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedMethod {
    name: &'static str,
    default_retry: Option<RetryPolicy>,
    default_timeout: Option<Duration>,
}

enum Next<T> {
    Return(Result<T, ClientError>),
    Retry(Duration),
}

impl WrappedMethod {
    #[must_use]
    pub fn new(
        name: &'static str,
        default_retry: Option<RetryPolicy>,
        default_timeout: Option<Duration>,
    ) -> Self {
        Self {
            name,
            default_retry,
            default_timeout,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn default_retry(&self) -> Option<&RetryPolicy> {
        self.default_retry.as_ref()
    }

    #[must_use]
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    /// Invoke `raw`, retrying transient failures.
    ///
    /// Each attempt gets a fresh timeout (the per-call override or the
    /// method default), capped by what is left of the retry deadline. A
    /// timed-out attempt counts as `DEADLINE_EXCEEDED`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rpc`] for a failure that is not retried and
    /// [`ClientError::RetryDeadlineExceeded`] when the retry budget runs out.
    pub async fn call<Req, Resp, F, Fut>(
        &self,
        request: Req,
        options: CallOptions,
        mut raw: F,
    ) -> Result<Resp, ClientError>
    where
        Req: RoutingParams + Clone,
        F: FnMut(Req, CallContext) -> Fut,
        Fut: Future<Output = Result<Resp, Status>>,
    {
        let policy = options.effective_retry(self.default_retry.as_ref()).cloned();
        let policy = policy.as_ref();
        let base = self.base_context(&request, options);
        let start = tokio::time::Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let ctx = attempt_context(&base, policy, start.elapsed());
            let timeout = ctx.timeout;
            let span = tracing::debug_span!("grpc_call", op = self.name, attempt);

            let fut = raw(request.clone(), ctx);
            let result = async {
                let res = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, fut).await {
                        Ok(res) => res,
                        Err(_) => Err(Status::deadline_exceeded(format!(
                            "attempt timed out after {}",
                            humantime::format_duration(limit)
                        ))),
                    },
                    None => fut.await,
                };
                if let Err(ref status) = res {
                    self.log_failure(status, attempt);
                }
                res
            }
            .instrument(span)
            .await;

            match self.next_step(result, policy, attempt, start.elapsed()) {
                Next::Return(res) => return res,
                Next::Retry(delay) => tokio::time::sleep(delay).await,
            }
        }
    }

    /// Blocking counterpart of [`WrappedMethod::call`].
    ///
    /// Backoff sleeps block the calling thread. The attempt timeout is passed
    /// to `raw` through the [`CallContext`], which must enforce it.
    ///
    /// # Errors
    ///
    /// Same as [`WrappedMethod::call`].
    pub fn call_blocking<Req, Resp, F>(
        &self,
        request: Req,
        options: CallOptions,
        mut raw: F,
    ) -> Result<Resp, ClientError>
    where
        Req: RoutingParams + Clone,
        F: FnMut(Req, CallContext) -> Result<Resp, Status>,
    {
        let policy = options.effective_retry(self.default_retry.as_ref()).cloned();
        let policy = policy.as_ref();
        let base = self.base_context(&request, options);
        let start = std::time::Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let ctx = attempt_context(&base, policy, start.elapsed());
            let span = tracing::debug_span!("grpc_call", op = self.name, attempt);

            let result = span.in_scope(|| {
                let res = raw(request.clone(), ctx);
                if let Err(ref status) = res {
                    self.log_failure(status, attempt);
                }
                res
            });

            match self.next_step(result, policy, attempt, start.elapsed()) {
                Next::Return(res) => return res,
                Next::Retry(delay) => std::thread::sleep(delay),
            }
        }
    }

    fn base_context<Req: RoutingParams>(&self, request: &Req, options: CallOptions) -> CallContext {
        let CallOptions {
            timeout,
            mut metadata,
            ..
        } = options;
        append_routing_header(request, &mut metadata);
        CallContext {
            metadata,
            timeout: timeout.or(self.default_timeout),
        }
    }

    fn log_failure(&self, status: &Status, attempt: u32) {
        tracing::warn!(
            code = ?status.code(),
            message = %status.message(),
            attempt,
            op = self.name,
            "gRPC call failed",
        );
    }

    fn next_step<T>(
        &self,
        result: Result<T, Status>,
        policy: Option<&RetryPolicy>,
        attempt: u32,
        elapsed: Duration,
    ) -> Next<T> {
        let status = match result {
            Ok(resp) => {
                if attempt > 1 {
                    tracing::info!(op = self.name, attempt, "gRPC call succeeded after retries");
                }
                return Next::Return(Ok(resp));
            }
            Err(status) => status,
        };

        let Some(policy) = policy.filter(|p| p.is_retryable(&status)) else {
            tracing::error!(op = self.name, attempt, code = ?status.code(), "gRPC call giving up");
            return Next::Return(Err(ClientError::Rpc {
                operation: self.name,
                status,
            }));
        };

        let delay = calculate_backoff(&policy.backoff, attempt - 1);
        if elapsed + delay >= policy.deadline {
            tracing::error!(
                op = self.name,
                attempt,
                code = ?status.code(),
                deadline_ms = duration_to_i64_ms(policy.deadline),
                "gRPC call giving up: retry deadline exceeded"
            );
            return Next::Return(Err(ClientError::RetryDeadlineExceeded {
                operation: self.name,
                deadline: policy.deadline,
                attempts: attempt,
                last: status,
            }));
        }

        tracing::debug!(
            op = self.name,
            attempt,
            backoff_ms = duration_to_i64_ms(delay),
            "Retrying gRPC call after backoff"
        );
        Next::Retry(delay)
    }
}

fn attempt_context(base: &CallContext, policy: Option<&RetryPolicy>, elapsed: Duration) -> CallContext {
    let remaining = policy.map(|p| p.deadline.saturating_sub(elapsed));
    let timeout = match (base.timeout, remaining) {
        (Some(t), Some(r)) => Some(t.min(r)),
        (t, None) => t,
        (None, r) => r,
    };
    CallContext {
        metadata: base.metadata.clone(),
        timeout,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::retry::ExponentialBackoff;
    use crate::routing::ROUTING_HEADER;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tonic::Code;
    use tracing_test::traced_test;

    #[derive(Clone)]
    struct GetThing {
        name: String,
    }

    impl RoutingParams for GetThing {
        fn routing_params(&self) -> Vec<(&'static str, String)> {
            vec![("name", self.name.clone())]
        }
    }

    fn request() -> GetThing {
        GetThing {
            name: "projects/p/things/t".into(),
        }
    }

    fn idempotent() -> WrappedMethod {
        WrappedMethod::new(
            "get_thing",
            Some(RetryPolicy::default().with_backoff(ExponentialBackoff::fast())),
            Some(Duration::from_secs(20)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let method = idempotent();

        let result = method
            .call(request(), CallOptions::new(), |req, _ctx| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n <= 3 {
                        Err(Status::unavailable("try again"))
                    } else {
                        Ok(req.name)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, "projects/p/things/t");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_failure_surfaces_untouched() {
        let calls = Arc::new(AtomicU32::new(0));
        let err = idempotent()
            .call(request(), CallOptions::new(), |_req, _ctx| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Status::permission_denied("nope")) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, ClientError::Rpc { operation: "get_thing", .. }));
        assert_eq!(err.code(), Some(Code::PermissionDenied));
        assert_eq!(err.status().map(Status::message), Some("nope"));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_retry_deadline() {
        let method = WrappedMethod::new(
            "get_thing",
            Some(
                RetryPolicy::default()
                    .with_backoff(
                        ExponentialBackoff::new(
                            Duration::from_millis(400),
                            Duration::from_millis(400),
                            1.0,
                        )
                        .without_jitter(),
                    )
                    .with_deadline(Duration::from_secs(1)),
            ),
            None,
        );
        let calls = Arc::new(AtomicU32::new(0));

        let err = method
            .call(request(), CallOptions::new(), |_req, _ctx| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Status::unavailable("down")) }
            })
            .await
            .unwrap_err();

        // attempts at 0ms, 400ms, 800ms; the next one would start past 1s
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            ClientError::RetryDeadlineExceeded { attempts, last, .. } => {
                assert_eq!(attempts, 3);
                assert_eq!(last.code(), Code::Unavailable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_retry_makes_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let err = idempotent()
            .call(request(), CallOptions::new().without_retry(), |_req, _ctx| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Status::unavailable("down")) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.code(), Some(Code::Unavailable));
    }

    #[tokio::test(start_paused = true)]
    async fn override_policy_applies_to_one_call() {
        let method = WrappedMethod::new("create_thing", None, None);
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new([Code::Aborted]).with_backoff(ExponentialBackoff::fast());

        method
            .call(request(), CallOptions::new().with_retry(policy), |_req, _ctx| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(Status::aborted("conflict"))
                    } else {
                        Ok(())
                    }
                }
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // Without the override the method does not retry.
        calls.store(0, Ordering::SeqCst);
        let err = method
            .call(request(), CallOptions::new(), |_req, _ctx| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Status::aborted("conflict")) }
            })
            .await
            .unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.code(), Some(Code::Aborted));
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_timeout_yields_deadline_exceeded() {
        let method = WrappedMethod::new("create_thing", None, Some(Duration::from_secs(45)));
        let err = method
            .call(
                request(),
                CallOptions::new().with_timeout(Duration::from_secs(1)),
                |_req, ctx| async move {
                    assert_eq!(ctx.timeout, Some(Duration::from_secs(1)));
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok::<_, Status>(())
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Rpc { .. }));
        assert_eq!(err.code(), Some(Code::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn routing_entry_follows_caller_metadata() {
        let options = CallOptions::new().with_metadata("x-trace", "abc");
        idempotent()
            .call(request(), options, |_req, ctx| async move {
                assert_eq!(ctx.metadata[0], ("x-trace".to_owned(), "abc".to_owned()));
                assert_eq!(
                    ctx.metadata[1],
                    (ROUTING_HEADER.to_owned(), "name=projects%2Fp%2Fthings%2Ft".to_owned())
                );
                assert_eq!(ctx.timeout, Some(Duration::from_secs(20)));
                Ok::<_, Status>(())
            })
            .await
            .unwrap();
    }

    #[test]
    fn blocking_retries_then_succeeds() {
        let mut calls = 0;
        let out = idempotent()
            .call_blocking(request(), CallOptions::new(), |_req, _ctx| {
                calls += 1;
                if calls < 3 {
                    Err(Status::deadline_exceeded("slow"))
                } else {
                    Ok(calls)
                }
            })
            .unwrap();
        assert_eq!(out, 3);
    }

    #[test]
    fn blocking_stops_at_retry_deadline() {
        let deadline = Duration::from_millis(200);
        let method = WrappedMethod::new(
            "get_thing",
            Some(
                RetryPolicy::new([Code::Unavailable])
                    .with_backoff(ExponentialBackoff::fast())
                    .with_deadline(deadline),
            ),
            Some(Duration::from_secs(20)),
        );

        let started = std::time::Instant::now();
        let mut calls = 0u32;
        let err = method
            .call_blocking(request(), CallOptions::new(), |_req, ctx| {
                calls += 1;
                assert!(ctx.timeout.is_some_and(|t| t <= deadline), "attempt timeout not capped");
                std::thread::sleep(Duration::from_millis(5));
                Err::<(), _>(Status::unavailable("down"))
            })
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!((2..=60).contains(&calls), "{calls} attempts");
        assert_eq!(err.code(), Some(Code::DeadlineExceeded));
        match err {
            ClientError::RetryDeadlineExceeded { attempts, last, .. } => {
                assert_eq!(attempts, calls);
                assert_eq!(last.code(), Code::Unavailable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blocking_non_retryable_is_immediate() {
        let mut calls = 0;
        let err = idempotent()
            .call_blocking(request(), CallOptions::new(), |_req, _ctx| {
                calls += 1;
                Err::<(), _>(Status::invalid_argument("bad"))
            })
            .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.code(), Some(Code::InvalidArgument));
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_give_up() {
        let _ = WrappedMethod::new("get_thing", None, None)
            .call(request(), CallOptions::new(), |_req, _ctx| async {
                Err::<(), _>(Status::not_found("gone"))
            })
            .await;
        assert!(logs_contain("gRPC call giving up"));
    }

    #[test]
    fn attempt_timeout_is_capped_by_remaining_deadline() {
        let base = CallContext {
            metadata: Vec::new(),
            timeout: Some(Duration::from_secs(20)),
        };
        let policy = RetryPolicy::default().with_deadline(Duration::from_secs(20));

        let ctx = attempt_context(&base, Some(&policy), Duration::from_secs(15));
        assert_eq!(ctx.timeout, Some(Duration::from_secs(5)));

        let ctx = attempt_context(&base, None, Duration::from_secs(15));
        assert_eq!(ctx.timeout, Some(Duration::from_secs(20)));
    }
}
