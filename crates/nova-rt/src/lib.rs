//! Runtime support for generated code: checked casts, `instanceof`, integral narrowing
//! and covariant arrays over the class hierarchy bootstrapped by the emitted program.
//!
//! A program owns one [`RuntimeContext`]. Fragments of the emitted program feed it type
//! definitions and class metadata in any order the loader sees them; generated code then
//! goes through [`RuntimeContext::casts`] and [`RuntimeContext::arrays`].
//!
//! Bootstrap failures ([`LoadError`]) are fatal and poison the context. Everything else
//! ([`RuntimeError`]) is a recoverable failure the generated code turns into a source
//! exception.

mod array;
mod cast;
mod config;
mod context;
mod error;
mod numeric;
mod value;

pub use array::{ArrayDescriptor, ArrayObject, ArrayRef, ArrayRuntime, ArrayType, StoreCheck};
pub use cast::CastEngine;
pub use config::{
    init_tracing, CheckConfig, ConfigError, HostTypeBindings, LoggingConfig, RuntimeConfig,
};
pub use context::{Fragment, RuntimeContext};
pub use error::{
    ArrayStoreError, CastError, IndexOutOfBounds, LoadError, NegativeSizeError, RuntimeError,
};
pub use numeric::{
    narrow, narrow16, narrow32, narrow8, narrow_char, round_to_byte, round_to_char,
    round_to_int, round_to_integral, round_to_long, round_to_short, to_int32, IntegralKind,
    Numeric,
};
pub use value::{ForeignObject, Instance, ObjectRef, Value};

pub use nova_rt_hierarchy::{
    ClassDef, ClassKind, ClassLiteral, HierarchyError, Prototype, PrototypeStrategy,
};
pub use nova_rt_types::{BootstrapError, RegistryOptions, TypeId, TypeRegistry};
