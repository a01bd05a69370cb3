//! Transport registry.
//!
//! An explicit, ordered label-to-factory map. The first registered label is
//! the default. Registries are built once and shared read-only (usually
//! behind an `Arc`); the process-wide defaults are initialized on first use
//! and never mutated afterwards.

use std::fmt;
use std::sync::{Arc, LazyLock};

use clustermgr_core::error::ClientError;

use crate::blocking::GrpcTransport;
use crate::grpc::GrpcAsyncioTransport;
use crate::transport::{BlockingClusterManagerTransport, ClusterManagerTransport, TransportParams};

/// Builds a transport from resolved construction parameters.
pub type TransportFactory<T> = Arc<dyn Fn(&TransportParams) -> Result<Arc<T>, ClientError> + Send + Sync>;

/// Which transport a client should use.
pub enum TransportSelector<T: ?Sized> {
    /// The registry's first registered label.
    Default,
    /// A registered label.
    Label(String),
    /// An already built transport, used as is.
    Prebuilt(Arc<T>),
}

impl<T: ?Sized> Default for TransportSelector<T> {
    fn default() -> Self {
        Self::Default
    }
}

impl<T: ?Sized> Clone for TransportSelector<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Label(label) => Self::Label(label.clone()),
            Self::Prebuilt(transport) => Self::Prebuilt(Arc::clone(transport)),
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for TransportSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Self::Prebuilt(transport) => f.debug_tuple("Prebuilt").field(transport).finish(),
        }
    }
}

impl<T: ?Sized> From<&str> for TransportSelector<T> {
    fn from(label: &str) -> Self {
        Self::Label(label.to_owned())
    }
}

impl<T: ?Sized> From<Arc<T>> for TransportSelector<T> {
    fn from(transport: Arc<T>) -> Self {
        Self::Prebuilt(transport)
    }
}

impl<T: ?Sized> TransportSelector<T> {
    #[must_use]
    pub fn is_prebuilt(&self) -> bool {
        matches!(self, Self::Prebuilt(_))
    }
}

/// Ordered mapping from transport label to factory.
pub struct TransportRegistry<T: ?Sized> {
    entries: Vec<(String, TransportFactory<T>)>,
}

impl<T: ?Sized> Default for TransportRegistry<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: ?Sized> fmt::Debug for TransportRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("labels", &self.labels())
            .finish()
    }
}

impl<T: ?Sized> TransportRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `label`.
    ///
    /// Re-registering a label replaces its factory and keeps its position.
    pub fn register<F>(&mut self, label: impl Into<String>, factory: F)
    where
        F: Fn(&TransportParams) -> Result<Arc<T>, ClientError> + Send + Sync + 'static,
    {
        let label = label.into();
        let factory: TransportFactory<T> = Arc::new(factory);
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((label, factory)),
        }
    }

    /// Builder form of [`TransportRegistry::register`].
    #[must_use]
    pub fn with<F>(mut self, label: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&TransportParams) -> Result<Arc<T>, ClientError> + Send + Sync + 'static,
    {
        self.register(label, factory);
        self
    }

    /// Labels in registration order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    #[must_use]
    pub fn default_label(&self) -> Option<&str> {
        self.entries.first().map(|(label, _)| label.as_str())
    }

    /// Factory for `label`, or for the default label when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownTransport`] if no such label is
    /// registered (or the registry is empty).
    pub fn factory(&self, label: Option<&str>) -> Result<(&str, &TransportFactory<T>), ClientError> {
        let found = match label {
            Some(label) => self.entries.iter().find(|(existing, _)| existing == label),
            None => self.entries.first(),
        };
        found
            .map(|(label, factory)| (label.as_str(), factory))
            .ok_or_else(|| ClientError::UnknownTransport {
                label: label.unwrap_or("<default>").to_owned(),
                registered: self.labels().join(", "),
            })
    }

    /// Resolve a selector into a transport.
    ///
    /// A prebuilt transport is returned unchanged and `params` is not
    /// evaluated; otherwise the selected factory is invoked with it.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnknownTransport`] for an unregistered label, or any
    /// error produced by `params` or the factory.
    pub fn resolve<P>(&self, selector: TransportSelector<T>, params: P) -> Result<Arc<T>, ClientError>
    where
        P: FnOnce() -> Result<TransportParams, ClientError>,
    {
        let label = match selector {
            TransportSelector::Prebuilt(transport) => return Ok(transport),
            TransportSelector::Default => None,
            TransportSelector::Label(label) => Some(label),
        };

        let (label, factory) = self.factory(label.as_deref())?;
        let params = params()?;
        let transport = factory(&params)?;
        tracing::info!(transport = label, host = %params.host, "transport created");
        Ok(transport)
    }
}

static ASYNC_DEFAULT: LazyLock<Arc<TransportRegistry<dyn ClusterManagerTransport>>> =
    LazyLock::new(|| Arc::new(TransportRegistry::async_default()));

static BLOCKING_DEFAULT: LazyLock<Arc<TransportRegistry<dyn BlockingClusterManagerTransport>>> =
    LazyLock::new(|| Arc::new(TransportRegistry::blocking_default()));

impl TransportRegistry<dyn ClusterManagerTransport> {
    /// Registry holding the `grpc_asyncio` transport.
    #[must_use]
    pub fn async_default() -> Self {
        Self::new().with(GrpcAsyncioTransport::LABEL, |params| {
            let transport: Arc<dyn ClusterManagerTransport> = Arc::new(GrpcAsyncioTransport::new(params)?);
            Ok(transport)
        })
    }

    /// Process-wide instance of [`TransportRegistry::async_default`].
    #[must_use]
    pub fn shared_async() -> Arc<Self> {
        Arc::clone(&ASYNC_DEFAULT)
    }
}

impl TransportRegistry<dyn BlockingClusterManagerTransport> {
    /// Registry holding the `grpc` transport.
    #[must_use]
    pub fn blocking_default() -> Self {
        Self::new().with(GrpcTransport::LABEL, |params| {
            let transport: Arc<dyn BlockingClusterManagerTransport> = Arc::new(GrpcTransport::new(params)?);
            Ok(transport)
        })
    }

    /// Process-wide instance of [`TransportRegistry::blocking_default`].
    #[must_use]
    pub fn shared_blocking() -> Arc<Self> {
        Arc::clone(&BLOCKING_DEFAULT)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::operations::WrappedMethods;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Named {
        name: &'static str,
        methods: WrappedMethods,
    }

    #[async_trait]
    impl ClusterManagerTransport for Named {
        fn host(&self) -> &str {
            self.name
        }

        fn wrapped_methods(&self) -> &WrappedMethods {
            &self.methods
        }
    }

    fn named(name: &'static str) -> Arc<dyn ClusterManagerTransport> {
        Arc::new(Named {
            name,
            methods: WrappedMethods::defaults(),
        })
    }

    fn registry() -> TransportRegistry<dyn ClusterManagerTransport> {
        TransportRegistry::new()
            .with("first", |_| Ok(named("first")))
            .with("second", |_| Ok(named("second")))
    }

    fn params() -> Result<TransportParams, ClientError> {
        Ok(TransportParams::new("h"))
    }

    #[test]
    fn first_registered_label_is_default() {
        let registry = registry();
        assert_eq!(registry.default_label(), Some("first"));
        let transport = registry.resolve(TransportSelector::Default, params).unwrap();
        assert_eq!(transport.host(), "first");
    }

    #[test]
    fn label_selects_exact_factory() {
        let transport = registry().resolve("second".into(), params).unwrap();
        assert_eq!(transport.host(), "second");
    }

    #[test]
    fn unknown_label_lists_registered_ones() {
        let err = registry().resolve("grpc_rest".into(), params).unwrap_err();
        match err {
            ClientError::UnknownTransport { label, registered } => {
                assert_eq!(label, "grpc_rest");
                assert_eq!(registered, "first, second");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_registry_has_no_default() {
        let registry = TransportRegistry::<dyn ClusterManagerTransport>::new();
        assert!(matches!(
            registry.resolve(TransportSelector::Default, params),
            Err(ClientError::UnknownTransport { .. })
        ));
    }

    #[test]
    fn prebuilt_skips_construction() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let registry = TransportRegistry::<dyn ClusterManagerTransport>::new().with("counting", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(named("counting"))
        });

        let prebuilt = named("mine");
        let resolved = registry
            .resolve(TransportSelector::Prebuilt(Arc::clone(&prebuilt)), || {
                panic!("params must not be evaluated for a prebuilt transport")
            })
            .unwrap();

        assert!(Arc::ptr_eq(&resolved, &prebuilt));
        assert_eq!(built.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let registry = registry().with("first", |_| Ok(named("replaced")));
        assert_eq!(registry.labels(), vec!["first", "second"]);
        let transport = registry.resolve(TransportSelector::Default, params).unwrap();
        assert_eq!(transport.host(), "replaced");
    }

    #[test]
    fn default_registries_expose_their_labels() {
        assert_eq!(TransportRegistry::shared_async().labels(), vec!["grpc_asyncio"]);
        assert_eq!(TransportRegistry::shared_blocking().labels(), vec!["grpc"]);
    }
}
