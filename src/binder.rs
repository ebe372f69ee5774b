use crate::error::BindError;
use crate::headers::HeaderSource;
use crate::parse::Narrowing;
use crate::record::{FieldBinding, HeaderRecord};

/// Binds header values onto annotated record fields.
///
/// A `Binder` only carries configuration; it holds no state between calls and
/// is cheap to copy. Use [`bind`] for the default configuration.
///
/// # Binding rules
///
/// - An empty source returns `Ok(())` without touching the record.
/// - Fields are visited in declaration order. Unannotated and excluded fields
///   are skipped, as are fields whose key has no values in the source.
/// - The first conversion error aborts the walk. Fields bound before it keep
///   their new values; bind into a scratch record when atomicity matters.
///
/// # Examples
///
/// ```
/// use header_bind::{Binder, HeaderMap, HeaderRecord, Narrowing};
///
/// #[derive(Debug, Default, HeaderRecord)]
/// struct Limits {
///     #[header("x-max-body")]
///     max_body: u16,
///     #[header("x-trace")]
///     trace: bool,
/// }
///
/// let mut headers = HeaderMap::new();
/// headers.insert("X-Max-Body", "70000");
/// headers.insert("X-Trace", "true");
///
/// let mut limits = Limits::default();
/// let err = Binder::new().bind(&mut limits, &headers).unwrap_err();
/// assert_eq!(err.field(), Some("max_body"));
///
/// Binder::new()
///     .with_narrowing(Narrowing::Truncate)
///     .bind(&mut limits, &headers)
///     .unwrap();
/// assert_eq!(limits.max_body, 70000_u32 as u16);
/// assert!(limits.trace);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binder {
    narrowing: Narrowing,
}

impl Binder {
    /// Creates a binder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how parsed numbers are fitted into narrower fields.
    pub fn with_narrowing(mut self, narrowing: Narrowing) -> Self {
        self.narrowing = narrowing;
        self
    }

    /// Returns the configured narrowing policy.
    pub fn narrowing(&self) -> Narrowing {
        self.narrowing
    }

    /// Populates `record` from `headers`.
    pub fn bind<R, H>(&self, record: &mut R, headers: &H) -> Result<(), BindError>
    where
        R: HeaderRecord + ?Sized,
        H: HeaderSource + ?Sized,
    {
        if headers.is_empty() {
            tracing::trace!("header source is empty, nothing to bind");
            return Ok(());
        }

        for binding in record.header_fields() {
            let (field, key, slot) = match binding {
                FieldBinding::Bound { field, key, slot } => (field, key, slot),
                FieldBinding::Excluded { field } => {
                    tracing::trace!(field, reason = "excluded", "skipping field");
                    continue;
                }
                FieldBinding::Unannotated { field } => {
                    tracing::trace!(field, reason = "unannotated", "skipping field");
                    continue;
                }
            };

            let values = headers.header_values(key);
            if values.is_empty() {
                tracing::trace!(field, key, reason = "missing", "skipping field");
                continue;
            }

            tracing::trace!(
                field,
                key,
                values = values.len(),
                ty = slot.type_name(),
                "binding field"
            );
            if let Err(error) = slot.assign(field, &values, self.narrowing) {
                tracing::debug!(field, key, %error, "header binding failed");
                return Err(error);
            }
        }

        Ok(())
    }
}

/// Populates `record` from `headers` with the default [`Binder`].
///
/// # Examples
///
/// ```
/// use header_bind::{HeaderMap, HeaderRecord};
///
/// #[derive(Debug, Default, HeaderRecord)]
/// struct Caller {
///     #[header("x-request-id")]
///     request_id: String,
///     #[header("x-forwarded-for")]
///     hops: Vec<String>,
///     #[header("-")]
///     internal: u64,
/// }
///
/// let mut headers = HeaderMap::new();
/// headers.insert("X-Request-Id", "req-42");
/// headers.append("X-Forwarded-For", "10.0.0.1");
/// headers.append("X-Forwarded-For", "10.0.0.2");
///
/// let mut caller = Caller::default();
/// header_bind::bind(&mut caller, &headers).unwrap();
///
/// assert_eq!(caller.request_id, "req-42");
/// assert_eq!(caller.hops, ["10.0.0.1", "10.0.0.2"]);
/// assert_eq!(caller.internal, 0);
/// ```
pub fn bind<R, H>(record: &mut R, headers: &H) -> Result<(), BindError>
where
    R: HeaderRecord + ?Sized,
    H: HeaderSource + ?Sized,
{
    Binder::default().bind(record, headers)
}
