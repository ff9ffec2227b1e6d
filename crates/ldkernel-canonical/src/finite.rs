//! Pre-conversion walk rejecting floats that JSON cannot hold.
//!
//! `serde_json::to_value` maps NaN and the infinities to `null`. Running this
//! walk first turns them into [`CanonicalizationError::NonFiniteNumber`]
//! instead, so distinct values never share a canonical form.

use std::fmt;

use serde::ser::{self, Serialize};

use crate::canonicalizer::CanonicalizationError;

#[derive(Debug, thiserror::Error)]
enum WalkError {
    #[error("non-finite number detected at {0}")]
    NonFinite(String),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for WalkError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        WalkError::Custom(msg.to_string())
    }
}

/// Fails if any float reachable from `value` is NaN or infinite.
pub(crate) fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), CanonicalizationError> {
    value
        .serialize(&mut FiniteCheck::default())
        .map_err(|err| match err {
            WalkError::NonFinite(path) => CanonicalizationError::NonFiniteNumber(path),
            WalkError::Custom(msg) => CanonicalizationError::Encode(msg),
        })
}

/// Serializer that produces nothing and tracks the path to the current value.
#[derive(Default)]
struct FiniteCheck {
    segments: Vec<String>,
}

impl FiniteCheck {
    fn path(&self) -> String {
        if self.segments.is_empty() {
            "root".to_string()
        } else {
            self.segments.join(".")
        }
    }

    fn float(&self, v: f64) -> Result<(), WalkError> {
        if v.is_finite() {
            Ok(())
        } else {
            Err(WalkError::NonFinite(self.path()))
        }
    }

    fn nested<T: Serialize + ?Sized>(&mut self, segment: String, value: &T) -> Result<(), WalkError> {
        self.segments.push(segment);
        let result = value.serialize(&mut *self);
        self.segments.pop();
        result
    }

    fn compound(&mut self, variant: Option<&'static str>) -> Compound<'_> {
        if let Some(variant) = variant {
            self.segments.push(variant.to_string());
        }
        Compound {
            check: self,
            index: 0,
            key: None,
            in_variant: variant.is_some(),
        }
    }
}

fn key_label<T: Serialize + ?Sized>(key: &T) -> String {
    match serde_json::to_value(key) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => "<key>".to_string(),
    }
}

impl<'a> ser::Serializer for &'a mut FiniteCheck {
    type Ok = ();
    type Error = WalkError;
    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, _v: bool) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_i8(self, _v: i8) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_i16(self, _v: i16) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_i32(self, _v: i32) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_i64(self, _v: i64) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_i128(self, _v: i128) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_u8(self, _v: u8) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_u16(self, _v: u16) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_u32(self, _v: u32) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_u64(self, _v: u64) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_u128(self, _v: u128) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> Result<(), WalkError> {
        self.float(f64::from(v))
    }
    fn serialize_f64(self, v: f64) -> Result<(), WalkError> {
        self.float(v)
    }
    fn serialize_char(self, _v: char) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_str(self, _v: &str) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_none(self) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), WalkError> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), WalkError> {
        Ok(())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), WalkError> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), WalkError> {
        self.nested(variant.to_string(), value)
    }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(None))
    }
    fn serialize_tuple(self, _len: usize) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(None))
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(None))
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(Some(variant)))
    }
    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(None))
    }
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(None))
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, WalkError> {
        Ok(self.compound(Some(variant)))
    }
}

struct Compound<'a> {
    check: &'a mut FiniteCheck,
    index: usize,
    key: Option<String>,
    in_variant: bool,
}

impl Compound<'_> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WalkError> {
        let segment = format!("[{}]", self.index);
        self.index += 1;
        self.check.nested(segment, value)
    }

    fn finish(self) -> Result<(), WalkError> {
        if self.in_variant {
            self.check.segments.pop();
        }
        Ok(())
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WalkError> {
        self.element(value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WalkError> {
        self.element(value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WalkError> {
        self.element(value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WalkError> {
        self.element(value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), WalkError> {
        self.key = Some(key_label(key));
        Ok(())
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WalkError> {
        let segment = self.key.take().unwrap_or_default();
        self.check.nested(segment, value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), WalkError> {
        self.check.nested(key.to_string(), value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = WalkError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), WalkError> {
        self.check.nested(key.to_string(), value)
    }
    fn end(self) -> Result<(), WalkError> {
        self.finish()
    }
}
