//! The storage-driver boundary.
//!
//! Drivers register under a name in an application-owned [`Registry`]. Opening
//! one yields a [`Db`] that hands out expressions compiled in the driver's
//! format and moves records in and out as JSON objects, which a typed
//! [`Collector`] turns into the caller's own types.

use std::{collections::BTreeMap, fmt, sync::Arc};

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    expr::{Expression, RawExpr, Validator},
    format::{Format, with_defaults},
};

/// A record as it crosses the driver boundary.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A named storage backend.
pub trait Driver: Send + Sync {
    fn open(&self, data_source: &str) -> Result<Box<dyn Connection>>;
}

/// An open backend session.
pub trait Connection: Send + Sync {
    /// Driver-specific formatting rules. `None` for the default rules.
    fn format(&self) -> Option<Arc<dyn Format>> {
        None
    }

    /// Query by condition, pushing every matching record into `sink`.
    fn get(&self, req: &GetRequest, sink: &mut dyn Sink) -> Result<()>;

    /// Store `item`, pushing the stored record back into `sink`.
    fn set(&self, item: &Record, filter: Filter, sink: &mut dyn Sink) -> Result<()>;

    fn delete(&self, item: &Record, sink: &mut dyn Sink) -> Result<()>;

    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Receives records produced by a driver.
pub trait Sink {
    fn push(&mut self, record: Record) -> Result<()>;
}

/// Collects results of one type, in the order they were produced.
#[derive(Debug)]
pub struct Collector<T> {
    all: Vec<T>,
}

impl<T> Collector<T> {
    pub fn new() -> Self {
        Collector { all: Vec::new() }
    }

    /// Allocate a new default instance, track it, and hand it out for filling.
    pub fn alloc(&mut self) -> &mut T
    where
        T: Default,
    {
        let index = self.all.len();
        self.all.push(T::default());
        &mut self.all[index]
    }

    pub fn all(&self) -> &[T] {
        &self.all
    }

    pub fn into_vec(self) -> Vec<T> {
        self.all
    }
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Collector::new()
    }
}

impl<T: DeserializeOwned> Sink for Collector<T> {
    fn push(&mut self, record: Record) -> Result<()> {
        let item = serde_json::from_value(serde_json::Value::Object(record))
            .map_err(|e| Error::Mismatch(e.to_string()))?;
        self.all.push(item);
        Ok(())
    }
}

/// Stores a list of field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    names: Vec<String>,
}

impl Fields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Fields {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Which fields a set operation may write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// No rule applied.
    #[default]
    Off,
    /// The item is being set: all fields are allowed.
    SetItem,
    /// The item is being created: all fields except auto-generated ones.
    CreateItem,
}

/// Parameters of a get operation.
#[derive(Default)]
pub struct GetRequest {
    /// Matching condition to accept a record.
    pub condition: Option<Arc<dyn Expression>>,
    /// Limit the response to these fields.
    pub fields: Option<Fields>,
    /// Limit on the number of items.
    pub limit: Option<usize>,
}

impl GetRequest {
    pub fn with_condition(mut self, condition: impl Expression + 'static) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }
}

impl fmt::Debug for GetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetRequest")
            .field("condition", &self.condition.is_some())
            .field("fields", &self.fields)
            .field("limit", &self.limit)
            .finish()
    }
}

#[derive(Debug)]
pub struct GetResponse<T> {
    pub results: Vec<T>,
}

#[derive(Debug)]
pub struct GetOneResponse<T> {
    pub result: Option<T>,
}

#[derive(Debug, Clone)]
pub struct SetRequest<T> {
    /// The item to set.
    pub item: T,
    /// Determines which fields are written.
    pub filter: Filter,
}

#[derive(Debug)]
pub struct SetResponse<T> {
    pub item: Option<T>,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest<T> {
    pub item: T,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResponse {
    /// Records the driver reported as removed.
    pub removed: usize,
}

/// Registered drivers, by name.
#[derive(Default)]
pub struct Registry {
    drivers: RwLock<BTreeMap<String, Arc<dyn Driver>>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Make a driver available under `name`.
    ///
    /// # Panics
    ///
    /// Registering the same name twice is a programming error and panics.
    pub fn register(&self, name: impl Into<String>, driver: Arc<dyn Driver>) {
        let name = name.into();
        let mut drivers = self.drivers.write();
        if drivers.contains_key(&name) {
            panic!("doc-expr: register called twice for driver {name}");
        }
        info!(driver = %name, "registered driver");
        drivers.insert(name, driver);
    }

    /// The names of the registered drivers, sorted.
    pub fn drivers(&self) -> Vec<String> {
        self.drivers.read().keys().cloned().collect()
    }

    pub fn open(&self, name: &str, data_source: &str) -> Result<Db> {
        let driver = self.drivers.read().get(name).cloned();
        let Some(driver) = driver else {
            return Err(Error::BadRequest(format!(
                "unknown driver {name} (forgotten registration, or select from {:?})",
                self.drivers()
            )));
        };
        debug!(driver = %name, "opening driver");
        let conn = driver.open(data_source)?;
        Ok(Db::new(conn))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("drivers", &self.drivers())
            .finish()
    }
}

/// An open database: a connection plus its cached format.
pub struct Db {
    conn: Box<dyn Connection>,
    format: Arc<dyn Format>,
}

impl Db {
    pub fn new(conn: Box<dyn Connection>) -> Self {
        let format = with_defaults(conn.format());
        Db { conn, format }
    }

    /// The driver's format with default fallback.
    pub fn format(&self) -> &Arc<dyn Format> {
        &self.format
    }

    /// A new expression using the optional validator and the driver's format.
    pub fn expr(&self, term: impl Into<String>, validator: Option<Arc<dyn Validator>>) -> RawExpr {
        let expr = RawExpr::new(term, Arc::clone(&self.format));
        match validator {
            Some(v) => expr.with_validator(v),
            None => expr,
        }
    }

    /// Items matching the request's condition.
    pub fn get<T: DeserializeOwned>(&self, req: &GetRequest) -> Result<GetResponse<T>> {
        let mut collector = Collector::new();
        self.conn.get(req, &mut collector)?;
        let mut results = collector.into_vec();
        if let Some(limit) = req.limit {
            results.truncate(limit);
        }
        Ok(GetResponse { results })
    }

    /// The first item matching the request's condition.
    pub fn get_one<T: DeserializeOwned>(&self, mut req: GetRequest) -> Result<GetOneResponse<T>> {
        req.limit = Some(1);
        let resp = self.get(&req)?;
        Ok(GetOneResponse {
            result: resp.results.into_iter().next(),
        })
    }

    pub fn set<T>(&self, req: &SetRequest<T>) -> Result<SetResponse<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let record = to_record(&req.item)?;
        let mut collector = Collector::new();
        self.conn.set(&record, req.filter, &mut collector)?;
        Ok(SetResponse {
            item: collector.into_vec().into_iter().next(),
        })
    }

    pub fn delete<T>(&self, req: &DeleteRequest<T>) -> Result<DeleteResponse>
    where
        T: Serialize + DeserializeOwned,
    {
        let record = to_record(&req.item)?;
        let mut collector: Collector<T> = Collector::new();
        self.conn.delete(&record, &mut collector)?;
        Ok(DeleteResponse {
            removed: collector.all().len(),
        })
    }

    pub fn close(self) -> Result<()> {
        self.conn.close()
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db").finish_non_exhaustive()
    }
}

fn to_record<T: Serialize>(item: &T) -> Result<Record> {
    match serde_json::to_value(item) {
        Ok(serde_json::Value::Object(record)) => Ok(record),
        Ok(other) => Err(Error::Mismatch(format!(
            "item must serialize to an object, got {other}"
        ))),
        Err(e) => Err(Error::Mismatch(e.to_string())),
    }
}
