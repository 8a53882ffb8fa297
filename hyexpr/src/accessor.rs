//! Resolution of sub-values addressed by selectors.
//!
//! Selectors never inspect a [`Value`] directly; they go through a [`ValueAccessor`] which
//! answers "give me this key/property/method result/element sequence" or returns `None` when
//! the subject does not have the requested shape. A `None` always makes the selector evaluate
//! to `false`.
//!
//! [`StandardAccessor`] covers lists, maps and host [`Object`]s. [`Record`] is a ready-made
//! object with properties, methods and a class hierarchy.
use std::{borrow::Cow, fmt, sync::Arc};

use indexmap::IndexMap;

use crate::value::{Key, Value};

/// Capabilities of a host object stored in [`Value::Object`].
///
/// Every capability is optional: the defaults describe an opaque object without properties,
/// methods, array access or iteration.
pub trait Object: fmt::Debug + Send + Sync {
    /// Runtime class name, as used by `instanceOf`.
    fn class_name(&self) -> &str;

    /// Whether the object is an instance of `class` or of one of its subtypes.
    fn is_instance_of(&self, class: &str) -> bool {
        self.class_name() == class
    }

    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Invoke a method. `None` when the method does not exist.
    fn call_method(&self, _name: &str, _args: &[Value]) -> Option<Value> {
        None
    }

    /// Array-style access. `None` when the object does not support it or the key is absent.
    fn offset_get(&self, _key: &Key) -> Option<Value> {
        None
    }

    /// Array-style key presence. `None` when the object does not support array access.
    fn has_offset(&self, _key: &Key) -> Option<bool> {
        None
    }

    /// Elements of a traversable object.
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }

    /// Size of a countable object.
    fn count(&self) -> Option<usize> {
        None
    }
}

/// Iterator over the elements of a traversable subject.
pub type Elements<'v> = Box<dyn Iterator<Item = Cow<'v, Value>> + 'v>;

/// Resolves sub-values for selectors. Every method returns `None` on a shape mismatch.
pub trait ValueAccessor {
    /// Entry `key` of a key-addressable subject.
    fn resolve_key<'v>(&self, subject: &'v Value, key: &Key) -> Option<Cow<'v, Value>>;

    /// Whether `key` is present. `None` when the subject is not key-addressable at all.
    fn has_key(&self, subject: &Value, key: &Key) -> Option<bool>;

    fn resolve_property<'v>(&self, subject: &'v Value, name: &str) -> Option<Cow<'v, Value>>;

    fn invoke_method<'v>(
        &self,
        subject: &'v Value,
        name: &str,
        args: &[Value],
    ) -> Option<Cow<'v, Value>>;

    /// Elements of a traversable subject, in order.
    fn iterate<'v>(&self, subject: &'v Value) -> Option<Elements<'v>>;

    /// Number of elements of a countable subject.
    fn length(&self, subject: &Value) -> Option<usize>;
}

/// Default accessor for [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAccessor;

impl ValueAccessor for StandardAccessor {
    fn resolve_key<'v>(&self, subject: &'v Value, key: &Key) -> Option<Cow<'v, Value>> {
        match subject {
            Value::List(_) | Value::Map(_) => subject.array_get(key).map(Cow::Borrowed),
            Value::Object(object) => object.offset_get(key).map(Cow::Owned),
            _ => None,
        }
    }

    fn has_key(&self, subject: &Value, key: &Key) -> Option<bool> {
        match subject {
            Value::List(_) | Value::Map(_) => Some(subject.array_get(key).is_some()),
            Value::Object(object) => object.has_offset(key),
            _ => None,
        }
    }

    fn resolve_property<'v>(&self, subject: &'v Value, name: &str) -> Option<Cow<'v, Value>> {
        subject
            .as_object()
            .and_then(|object| object.property(name))
            .map(Cow::Owned)
    }

    fn invoke_method<'v>(
        &self,
        subject: &'v Value,
        name: &str,
        args: &[Value],
    ) -> Option<Cow<'v, Value>> {
        subject
            .as_object()
            .and_then(|object| object.call_method(name, args))
            .map(Cow::Owned)
    }

    fn iterate<'v>(&self, subject: &'v Value) -> Option<Elements<'v>> {
        match subject {
            Value::List(items) => Some(Box::new(items.iter().map(Cow::Borrowed))),
            Value::Map(entries) => Some(Box::new(entries.values().map(Cow::Borrowed))),
            Value::Object(object) => object
                .elements()
                .map(|items| Box::new(items.into_iter().map(Cow::Owned)) as Elements<'v>),
            _ => None,
        }
    }

    fn length(&self, subject: &Value) -> Option<usize> {
        match subject {
            Value::List(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Object(object) => object.count(),
            _ => None,
        }
    }
}

/// Method implementation attached to a [`Record`].
pub type MethodFn = Arc<dyn Fn(&Record, &[Value]) -> Option<Value> + Send + Sync>;

/// Plain data object: a class name, optional parent classes, ordered properties and methods.
///
/// ```
/// use hyexpr::accessor::Record;
/// use hyexpr::value::Value;
///
/// let file = Record::new("File")
///     .with_parent("Resource")
///     .with_property("size", 42)
///     .with_method("getSize", |this, _| this.get("size").cloned())
///     .into_value();
/// assert!(matches!(file, Value::Object(_)));
/// ```
#[derive(Clone)]
pub struct Record {
    class: String,
    parents: Vec<String>,
    properties: IndexMap<String, Value>,
    methods: IndexMap<String, MethodFn>,
}

impl Record {
    pub fn new(class: impl Into<String>) -> Self {
        Record {
            class: class.into(),
            parents: Vec::new(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    /// Anonymous object with class name `stdClass`.
    pub fn anonymous() -> Self {
        Self::new("stdClass")
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Record, &[Value]) -> Option<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Read a property.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn into_value(self) -> Value {
        Value::object(self)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("class", &self.class)
            .field("parents", &self.parents)
            .field("properties", &self.properties)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Object for Record {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn is_instance_of(&self, class: &str) -> bool {
        self.class == class || self.parents.iter().any(|p| p == class)
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value> {
        let method = self.methods.get(name)?;
        method(self, args)
    }
}
