// Shardbench - benchmark metrics aggregation toolkit
//
// Copyright (c) 2026 Shardbench contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scalar measurement values.

use std::fmt;

/// A scalar value carried by a measurement record or a metric leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Explicit fallible numeric coercion.
    ///
    /// The summarizer drops every sample for which this returns `None`.
    /// Integers and floats convert directly, booleans map to 1.0/0.0, and
    /// strings are accepted when they parse as a float. Null never
    /// coerces.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::String(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "~"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64_int() {
        assert_eq!(Value::Int(42).as_f64(), Some(42.0));
        assert_eq!(Value::Int(-3).as_f64(), Some(-3.0));
    }

    #[test]
    fn test_as_f64_float() {
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
    }

    #[test]
    fn test_as_f64_bool() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::Bool(false).as_f64(), Some(0.0));
    }

    #[test]
    fn test_as_f64_numeric_string() {
        assert_eq!(Value::from("3.5").as_f64(), Some(3.5));
        assert_eq!(Value::from(" 10 ").as_f64(), Some(10.0));
    }

    #[test]
    fn test_as_f64_non_numeric_string() {
        assert_eq!(Value::from("fast").as_f64(), None);
        assert_eq!(Value::from("").as_f64(), None);
    }

    #[test]
    fn test_as_f64_null() {
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Float(7.0).as_int(), None);
        assert_eq!(Value::from("7").as_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::Null), "~");
        assert_eq!(format!("{}", Value::Int(5)), "5");
        assert_eq!(format!("{}", Value::from("io_uring")), "io_uring");
    }
}
