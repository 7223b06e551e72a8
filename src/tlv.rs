//! Tag-length-value box
//!
//! 标签-长度-值 编码盒
//!
//! A small encoder/decoder for tagged binary fields. A serialized box is a
//! plain byte string and can be queued in a [`Fifo`](crate::Fifo) as one record.
//!
//! 用于带标签二进制字段的小型编解码器。序列化后的字节串可作为一条记录放入
//! [`Fifo`](crate::Fifo)。
//!
//! # Wire format
//!
//! Fields are laid out back to back, all integers in network byte order:
//!
//! ```text
//! +-----------+--------------+----------------+
//! | tag: i32  | length: u32  | value: [u8]    |
//! +-----------+--------------+----------------+
//! ```
//!
//! # Examples
//!
//! ```
//! use recring::TlvBox;
//!
//! let mut tlv = TlvBox::new();
//! tlv.put_scalar(1, 42i32).unwrap();
//! tlv.put_str(2, "hello").unwrap();
//! let wire = tlv.serialize().unwrap().to_vec();
//!
//! let mut parsed = TlvBox::parse(&wire).unwrap();
//! assert_eq!(parsed.get_scalar::<i32>(1).unwrap(), 42);
//! assert_eq!(parsed.get_str(2).unwrap(), "hello");
//! ```

use crate::error::TlvError;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Write};

/// Bytes taken by the tag and length of each field
///
/// 每个字段的标签与长度所占字节数
pub const TLV_HEADER_SIZE: usize = 8;

/// Fixed-width value with a big-endian wire form
///
/// 具有大端线上格式的定长值
pub trait TlvScalar: Sized + Copy {
    /// Width on the wire in bytes
    const WIDTH: usize;

    fn write_to<W: Write>(self, out: &mut W) -> io::Result<()>;

    fn read_from<R: Read>(input: &mut R) -> io::Result<Self>;
}

impl TlvScalar for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn write_to<W: Write>(self, out: &mut W) -> io::Result<()> {
        out.write_u8(self)
    }

    #[inline]
    fn read_from<R: Read>(input: &mut R) -> io::Result<Self> {
        input.read_u8()
    }
}

impl TlvScalar for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn write_to<W: Write>(self, out: &mut W) -> io::Result<()> {
        out.write_i8(self)
    }

    #[inline]
    fn read_from<R: Read>(input: &mut R) -> io::Result<Self> {
        input.read_i8()
    }
}

macro_rules! impl_tlv_scalar {
    ($($primitive:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl TlvScalar for $primitive {
                const WIDTH: usize = std::mem::size_of::<$primitive>();

                #[inline]
                fn write_to<W: Write>(self, out: &mut W) -> io::Result<()> {
                    out.$write::<BigEndian>(self)
                }

                #[inline]
                fn read_from<R: Read>(input: &mut R) -> io::Result<Self> {
                    input.$read::<BigEndian>()
                }
            }
        )*
    };
}

impl_tlv_scalar! {
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}

/// One tagged field
///
/// 单个带标签字段
#[derive(Debug, Clone, PartialEq)]
pub struct TlvField {
    pub tag: i32,
    pub value: Vec<u8>,
}

/// Ordered collection of tagged fields
///
/// 有序的带标签字段集合
///
/// A box accepts fields until it is serialized. Boxes produced by
/// [`parse`](TlvBox::parse) count as serialized; only reads are allowed.
///
/// 编码盒在序列化之前可以添加字段。由 [`parse`](TlvBox::parse)
/// 生成的编码盒视为已序列化，只允许读取。
#[derive(Debug, Default, Clone)]
pub struct TlvBox {
    fields: VecDeque<TlvField>,

    /// Encoded form, present once serialized or parsed
    ///
    /// 编码结果，序列化或解析后存在
    serialized: Option<Vec<u8>>,

    /// Size of the encoded form
    ///
    /// 编码后的字节数
    size: usize,
}

impl TlvBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a serialized box
    ///
    /// 解码序列化的编码盒
    ///
    /// # Errors
    ///
    /// Returns [`TlvError::Truncated`] if a header or value runs past the end of `buffer`.
    pub fn parse(buffer: &[u8]) -> Result<Self, TlvError> {
        let mut cursor = Cursor::new(buffer);
        let mut fields = VecDeque::new();

        while (cursor.position() as usize) < buffer.len() {
            let offset = cursor.position() as usize;
            let truncated = |_: io::Error| TlvError::Truncated { offset };

            let tag = cursor.read_i32::<BigEndian>().map_err(truncated)?;
            let length = cursor.read_u32::<BigEndian>().map_err(truncated)? as usize;

            // Reject before allocating for a bogus length
            let remaining = buffer.len() - cursor.position() as usize;
            if length > remaining {
                return Err(TlvError::Truncated { offset });
            }

            let mut value = vec![0u8; length];
            cursor.read_exact(&mut value).map_err(truncated)?;
            fields.push_back(TlvField { tag, value });
        }

        Ok(Self {
            fields,
            serialized: Some(buffer.to_vec()),
            size: buffer.len(),
        })
    }

    /// Encode all fields
    ///
    /// 编码所有字段
    ///
    /// # Errors
    ///
    /// Returns [`TlvError::AlreadySerialized`] when called a second time.
    pub fn serialize(&mut self) -> Result<&[u8], TlvError> {
        if self.serialized.is_some() {
            return Err(TlvError::AlreadySerialized);
        }

        let mut out = Vec::with_capacity(self.size);
        for field in &self.fields {
            out.write_i32::<BigEndian>(field.tag)?;
            // put_bytes already checked the length fits
            out.write_u32::<BigEndian>(field.value.len() as u32)?;
            out.write_all(&field.value)?;
        }
        debug_assert_eq!(out.len(), self.size);

        Ok(self.serialized.insert(out).as_slice())
    }

    /// Encoded bytes, if serialized
    ///
    /// 编码后的字节（如已序列化）
    pub fn buffer(&self) -> Option<&[u8]> {
        self.serialized.as_deref()
    }

    /// Encoded size in bytes
    ///
    /// 编码后的字节数
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of fields still held
    ///
    /// 仍持有的字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether every field has been taken out
    ///
    /// 检查所有字段是否都已取出
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate the remaining fields in insertion order
    ///
    /// 按插入顺序遍历剩余字段
    pub fn fields(&self) -> impl Iterator<Item = &TlvField> {
        self.fields.iter()
    }

    /// Add a raw field
    ///
    /// 添加原始字段
    ///
    /// # Errors
    ///
    /// - [`TlvError::AlreadySerialized`] once the box is serialized
    /// - [`TlvError::ValueTooLarge`] if the value does not fit a 32-bit length
    pub fn put_bytes(&mut self, tag: i32, value: &[u8]) -> Result<(), TlvError> {
        if self.serialized.is_some() {
            return Err(TlvError::AlreadySerialized);
        }
        if u32::try_from(value.len()).is_err() {
            return Err(TlvError::ValueTooLarge { len: value.len() });
        }

        self.fields.push_back(TlvField {
            tag,
            value: value.to_vec(),
        });
        self.size += TLV_HEADER_SIZE + value.len();
        Ok(())
    }

    pub fn put_scalar<T: TlvScalar>(&mut self, tag: i32, value: T) -> Result<(), TlvError> {
        let mut bytes = Vec::with_capacity(T::WIDTH);
        value.write_to(&mut bytes)?;
        self.put_bytes(tag, &bytes)
    }

    /// Add a string, stored with a trailing NUL
    ///
    /// 添加字符串，末尾附带 NUL
    pub fn put_str(&mut self, tag: i32, value: &str) -> Result<(), TlvError> {
        let mut bytes = Vec::with_capacity(value.len() + 1);
        bytes.extend_from_slice(value.as_bytes());
        bytes.push(0);
        self.put_bytes(tag, &bytes)
    }

    /// Nest another box as a field
    ///
    /// 将另一个编码盒作为字段嵌套
    ///
    /// # Errors
    ///
    /// Returns [`TlvError::NotSerialized`] unless `object` was serialized or parsed.
    pub fn put_object(&mut self, tag: i32, object: &TlvBox) -> Result<(), TlvError> {
        let buffer = object.buffer().ok_or(TlvError::NotSerialized)?;
        self.put_bytes(tag, buffer)
    }

    fn position(&self, tag: i32) -> Result<usize, TlvError> {
        self.fields
            .iter()
            .position(|field| field.tag == tag)
            .ok_or(TlvError::MissingTag { tag })
    }

    /// Remove the first field with `tag` and return its value
    ///
    /// 移除第一个带 `tag` 的字段并返回其值
    pub fn get_bytes(&mut self, tag: i32) -> Result<Vec<u8>, TlvError> {
        let index = self.position(tag)?;
        let field = self.fields.remove(index).ok_or(TlvError::MissingTag { tag })?;

        // A serialized buffer keeps its size; pending fields shrink it
        if self.serialized.is_none() {
            self.size -= TLV_HEADER_SIZE + field.value.len();
        }
        Ok(field.value)
    }

    /// Remove the first field with `tag` into a caller buffer
    ///
    /// 将第一个带 `tag` 的字段移除到调用者缓冲区
    ///
    /// The field stays in the box if `dest` is too small.
    ///
    /// 若 `dest` 太小，字段保留在编码盒中。
    pub fn get_bytes_into(&mut self, tag: i32, dest: &mut [u8]) -> Result<usize, TlvError> {
        let index = self.position(tag)?;
        let needed = self.fields[index].value.len();
        if needed > dest.len() {
            return Err(TlvError::BufferTooSmall {
                needed,
                available: dest.len(),
            });
        }

        let value = self.get_bytes(tag)?;
        dest[..needed].copy_from_slice(&value);
        Ok(needed)
    }

    /// Remove the first field with `tag` and decode it as `T`
    ///
    /// 移除第一个带 `tag` 的字段并解码为 `T`
    ///
    /// # Errors
    ///
    /// Returns [`TlvError::LengthMismatch`] if the stored width differs from `T`'s;
    /// the field stays in the box in that case.
    pub fn get_scalar<T: TlvScalar>(&mut self, tag: i32) -> Result<T, TlvError> {
        let index = self.position(tag)?;
        let found = self.fields[index].value.len();
        if found != T::WIDTH {
            return Err(TlvError::LengthMismatch {
                tag,
                expected: T::WIDTH,
                found,
            });
        }

        let value = self.get_bytes(tag)?;
        T::read_from(&mut value.as_slice()).map_err(|_| TlvError::LengthMismatch {
            tag,
            expected: T::WIDTH,
            found,
        })
    }

    /// Remove the first field with `tag` and decode it as a NUL-terminated string
    ///
    /// 移除第一个带 `tag` 的字段并解码为以 NUL 结尾的字符串
    pub fn get_str(&mut self, tag: i32) -> Result<String, TlvError> {
        let mut value = self.get_bytes(tag)?;
        if value.pop() != Some(0) {
            return Err(TlvError::InvalidString { tag });
        }
        String::from_utf8(value).map_err(|_| TlvError::InvalidString { tag })
    }

    /// Remove the first field with `tag` and parse it as a nested box
    ///
    /// 移除第一个带 `tag` 的字段并解析为嵌套编码盒
    pub fn get_object(&mut self, tag: i32) -> Result<TlvBox, TlvError> {
        let value = self.get_bytes(tag)?;
        TlvBox::parse(&value)
    }
}
