//! Dynamic invocation of registered component constructors.
//!
//! Constructors are user-supplied callables of heterogeneous signatures.
//! Rather than runtime reflection, each is registered with an explicit
//! declared parameter-kind list and an erased call function taking a slice
//! of tagged [`ArgValue`]s. `invoke` is the single place that validates
//! argument count and return shape uniformly for all of them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::component::Renderable;
use crate::error::DispatchError;

/// A tagged argument value extracted from a request's query parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Json(Value),
}

/// The kind of an [`ArgValue`], declared per constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Text,
    Boolean,
    Integer,
    Float,
    Object,
}

impl ArgValue {
    /// The kind tag of this value.
    #[must_use]
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Text(_) => ArgKind::Text,
            ArgValue::Bool(_) => ArgKind::Boolean,
            ArgValue::Int(_) => ArgKind::Integer,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Json(_) => ArgKind::Object,
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Text => "text",
            ArgKind::Boolean => "boolean",
            ArgKind::Integer => "integer",
            ArgKind::Float => "float",
            ArgKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// One value produced by a raw constructor call, before validation.
///
/// By convention a renderable return is a `Box<dyn Any>` containing a
/// `Box<dyn Renderable>`; anything else fails the signature check in
/// [`invoke`]. Use [`renderable`] to build a conforming value.
pub type ReturnValue = Box<dyn Any>;

/// Wrap a component value as a conforming constructor [`ReturnValue`].
#[must_use]
pub fn renderable(component: impl Renderable + 'static) -> ReturnValue {
    Box::new(Box::new(component) as Box<dyn Renderable>)
}

type CallFn = Arc<dyn Fn(&[ArgValue]) -> Vec<ReturnValue> + Send + Sync>;

/// A registered component constructor: a declared parameter-kind list and
/// an erased call function of matching arity.
#[derive(Clone)]
pub struct Constructor {
    params: Vec<ArgKind>,
    call: CallFn,
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Constructor {
    /// Build a constructor from a raw erased call function.
    ///
    /// The typed [`IntoConstructor`] conversions are preferred; this is
    /// the escape hatch for callables whose shape cannot be expressed as
    /// a plain closure over [`FromArgValue`] parameters. The call
    /// function's return is validated by [`invoke`], not here.
    pub fn raw(
        params: Vec<ArgKind>,
        call: impl Fn(&[ArgValue]) -> Vec<ReturnValue> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params,
            call: Arc::new(call),
        }
    }

    /// Number of parameters the constructor declares.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Declared parameter kinds, in positional order.
    #[must_use]
    pub fn params(&self) -> &[ArgKind] {
        &self.params
    }
}

/// Conversion from a tagged [`ArgValue`] to a concrete parameter type.
///
/// A kind mismatch is a registration-time programming error, not a
/// request-time condition, and panics with the offending kinds.
pub trait FromArgValue: Sized {
    /// The kind this parameter type is extracted from.
    const KIND: ArgKind;

    /// Convert `value` to this type, panicking on a kind mismatch.
    fn from_arg(value: &ArgValue) -> Self;
}

macro_rules! impl_from_arg_value {
    ($ty:ty, $kind:expr, $variant:ident) => {
        impl FromArgValue for $ty {
            const KIND: ArgKind = $kind;

            fn from_arg(value: &ArgValue) -> Self {
                match value {
                    ArgValue::$variant(inner) => inner.clone(),
                    other => panic!(
                        "constructor parameter declared as {} but extracted value is {}",
                        $kind,
                        other.kind()
                    ),
                }
            }
        }
    };
}

impl_from_arg_value!(String, ArgKind::Text, Text);
impl_from_arg_value!(bool, ArgKind::Boolean, Bool);
impl_from_arg_value!(i64, ArgKind::Integer, Int);
impl_from_arg_value!(f64, ArgKind::Float, Float);
impl_from_arg_value!(Value, ArgKind::Object, Json);

/// Conversion of a plain typed closure into a [`Constructor`].
///
/// Implemented for closures of arity 0 through 5 whose parameters
/// implement [`FromArgValue`] and whose return type is [`Renderable`].
pub trait IntoConstructor<Params> {
    /// Erase this callable into a dispatchable [`Constructor`].
    fn into_constructor(self) -> Constructor;
}

macro_rules! impl_into_constructor {
    ($($idx:tt $param:ident),*) => {
        impl<F, R, $($param,)*> IntoConstructor<($($param,)*)> for F
        where
            F: Fn($($param),*) -> R + Send + Sync + 'static,
            R: Renderable + 'static,
            $($param: FromArgValue,)*
        {
            fn into_constructor(self) -> Constructor {
                Constructor {
                    params: vec![$($param::KIND),*],
                    call: Arc::new(move |_values: &[ArgValue]| {
                        let component = self($($param::from_arg(&_values[$idx])),*);
                        vec![renderable(component)]
                    }),
                }
            }
        }
    };
}

impl_into_constructor!();
impl_into_constructor!(0 P0);
impl_into_constructor!(0 P0, 1 P1);
impl_into_constructor!(0 P0, 1 P1, 2 P2);
impl_into_constructor!(0 P0, 1 P1, 2 P2, 3 P3);
impl_into_constructor!(0 P0, 1 P1, 2 P2, 3 P3, 4 P4);

/// Invoke `constructor` for `component` with the positional `values`.
///
/// # Errors
///
/// Returns [`DispatchError::ArityMismatch`] when the value count differs
/// from the declared arity, and [`DispatchError::InvalidSignature`] when
/// the call does not produce exactly one renderable value.
pub fn invoke(
    component: &str,
    constructor: &Constructor,
    values: &[ArgValue],
) -> Result<Box<dyn Renderable>, DispatchError> {
    if values.len() != constructor.arity() {
        return Err(DispatchError::ArityMismatch {
            component: component.to_string(),
            expected: constructor.arity(),
            actual: values.len(),
        });
    }
    let mut results = (constructor.call)(values);
    if results.len() != 1 {
        return Err(DispatchError::InvalidSignature {
            component: component.to_string(),
        });
    }
    results
        .remove(0)
        .downcast::<Box<dyn Renderable>>()
        .map(|boxed| *boxed)
        .map_err(|_| DispatchError::InvalidSignature {
            component: component.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(component: &dyn Renderable) -> String {
        let mut buf = Vec::new();
        component.render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn banner() -> Constructor {
        (|text: String, loud: bool| {
            if loud {
                text.to_uppercase()
            } else {
                text
            }
        })
        .into_constructor()
    }

    #[test]
    fn test_invoke_with_matching_arity_returns_rendered_component() {
        let ctor = banner();
        let values = [ArgValue::Text("hello".to_string()), ArgValue::Bool(true)];

        let component = invoke("banner", &ctor, &values).unwrap();

        assert_eq!(render_to_string(component.as_ref()), "HELLO");
    }

    #[test]
    fn test_invoke_with_too_few_values_is_arity_mismatch() {
        let ctor = banner();
        let values = [ArgValue::Text("hello".to_string())];

        let err = invoke("banner", &ctor, &values).unwrap_err();

        match err {
            DispatchError::ArityMismatch {
                component,
                expected,
                actual,
            } => {
                assert_eq!(component, "banner");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invoke_with_too_many_values_is_arity_mismatch() {
        let ctor = banner();
        let values = [
            ArgValue::Text("hello".to_string()),
            ArgValue::Bool(false),
            ArgValue::Int(3),
        ];

        let err = invoke("banner", &ctor, &values).unwrap_err();

        assert!(matches!(
            err,
            DispatchError::ArityMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_constructor_returning_two_values_is_invalid_signature() {
        let ctor = Constructor::raw(vec![], |_| {
            vec![
                renderable("one".to_string()),
                renderable("two".to_string()),
            ]
        });

        let err = invoke("pair", &ctor, &[]).unwrap_err();

        assert!(matches!(err, DispatchError::InvalidSignature { component } if component == "pair"));
    }

    #[test]
    fn test_constructor_returning_non_renderable_is_invalid_signature() {
        let ctor = Constructor::raw(vec![], |_| vec![Box::new(42_i64) as ReturnValue]);

        let err = invoke("number", &ctor, &[]).unwrap_err();

        assert!(matches!(err, DispatchError::InvalidSignature { .. }));
    }

    #[test]
    fn test_zero_arity_constructor_invokes_with_empty_values() {
        let ctor = (|| "static".to_string()).into_constructor();

        let component = invoke("static", &ctor, &[]).unwrap();

        assert_eq!(render_to_string(component.as_ref()), "static");
    }

    #[test]
    #[should_panic(expected = "declared as text")]
    fn test_kind_mismatch_inside_typed_wrapper_panics() {
        let ctor = (|text: String| text).into_constructor();

        let _ = invoke("banner", &ctor, &[ArgValue::Int(1)]);
    }

    #[test]
    fn test_declared_params_match_closure_signature() {
        let ctor = banner();
        assert_eq!(ctor.params(), &[ArgKind::Text, ArgKind::Boolean]);
        assert_eq!(ctor.arity(), 2);
    }
}
