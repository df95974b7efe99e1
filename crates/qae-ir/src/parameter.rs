//! Symbolic parameters for variational circuits.
//!
//! A [`Parameter`] is a plain value identified by its `(namespace, index)`
//! pair. Parameters are kept in ordered [`ParameterList`]s whose order is
//! the binding order; lookups are linear scans over that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A symbolic placeholder for a real-valued angle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Parameter {
    namespace: String,
    index: u32,
}

impl Parameter {
    /// Create a parameter in the given namespace.
    pub fn new(namespace: impl Into<String>, index: u32) -> Self {
        Self {
            namespace: namespace.into(),
            index,
        }
    }

    /// Get the namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the ordinal index within the namespace.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.namespace, self.index)
    }
}

/// An ordered sequence of distinct parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Parameter>", into = "Vec<Parameter>")]
pub struct ParameterList {
    params: Vec<Parameter>,
}

impl ParameterList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { params: vec![] }
    }

    /// Create `namespace[0], namespace[1], ..., namespace[len - 1]`.
    pub fn vector(namespace: &str, len: usize) -> IrResult<Self> {
        let end = u32::try_from(len).map_err(|_| IrError::ParameterIndexOverflow(len))?;
        let params = (0..end).map(|i| Parameter::new(namespace, i)).collect();
        Ok(Self { params })
    }

    /// Append a parameter, rejecting duplicates.
    pub fn push(&mut self, param: Parameter) -> IrResult<()> {
        if self.contains(&param) {
            return Err(IrError::DuplicateParameter(param));
        }
        self.params.push(param);
        Ok(())
    }

    /// Append a parameter unless it is already present.
    ///
    /// Returns `true` if the parameter was added.
    pub fn insert_if_absent(&mut self, param: &Parameter) -> bool {
        if self.contains(param) {
            return false;
        }
        self.params.push(param.clone());
        true
    }

    /// Check whether the list holds this parameter.
    pub fn contains(&self, param: &Parameter) -> bool {
        self.params.iter().any(|p| p == param)
    }

    /// Get the binding position of a parameter.
    pub fn position(&self, param: &Parameter) -> Option<usize> {
        self.params.iter().position(|p| p == param)
    }

    /// Get the parameter at a position.
    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate in binding order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }

    /// View the parameters as a slice.
    pub fn as_slice(&self) -> &[Parameter] {
        &self.params
    }

    /// Check that no parameter appears in both lists.
    pub fn is_disjoint(&self, other: &ParameterList) -> bool {
        !self.params.iter().any(|p| other.contains(p))
    }

    /// Concatenate two disjoint lists, keeping `self` first.
    pub fn concat(&self, other: &ParameterList) -> IrResult<ParameterList> {
        let mut joined = self.clone();
        for param in other {
            joined.push(param.clone())?;
        }
        Ok(joined)
    }
}

impl TryFrom<Vec<Parameter>> for ParameterList {
    type Error = IrError;

    fn try_from(params: Vec<Parameter>) -> IrResult<Self> {
        let mut list = ParameterList::new();
        for param in params {
            list.push(param)?;
        }
        Ok(list)
    }
}

impl From<ParameterList> for Vec<Parameter> {
    fn from(list: ParameterList) -> Self {
        list.params
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// The angle operand of a rotation gate: free or bound to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// An unbound symbolic parameter.
    Free(Parameter),
    /// A concrete numeric value.
    Bound(f64),
}

impl Angle {
    /// Check if this angle is still symbolic.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Angle::Free(_))
    }

    /// Get the numeric value, if bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Angle::Bound(v) => Some(*v),
            Angle::Free(_) => None,
        }
    }

    /// Get the free parameter, if symbolic.
    pub fn parameter(&self) -> Option<&Parameter> {
        match self {
            Angle::Free(p) => Some(p),
            Angle::Bound(_) => None,
        }
    }

    /// Bind a parameter to a value, returning a new angle.
    pub fn bind(&self, param: &Parameter, value: f64) -> Self {
        match self {
            Angle::Free(p) if p == param => Angle::Bound(value),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Free(p) => write!(f, "{p}"),
            Angle::Bound(v) => write!(f, "{v}"),
        }
    }
}

impl From<Parameter> for Angle {
    fn from(param: Parameter) -> Self {
        Angle::Free(param)
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Bound(value)
    }
}
