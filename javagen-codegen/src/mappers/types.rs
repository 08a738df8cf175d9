//! Type expressions to Java types.

use eyre::{Result, eyre};
use javagen_codemodel::{PrimitiveKind, SchemaRef, TypeExpr};
use javagen_ir::IType;

use super::{MapperContext, enums};
use crate::runtime::RuntimeClass;

/// A Java type as stored on the wire and as exposed to callers.
///
/// The two differ only for encoded primitives such as `unix-time`, which is a
/// `long` on the wire and an `OffsetDateTime` in the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub wire: IType,
    pub client: IType,
}

impl MappedType {
    fn same(ty: IType) -> Self {
        Self {
            wire: ty.clone(),
            client: ty,
        }
    }

    /// Boxed form, for optional and nullable positions.
    pub fn nullable(self) -> Self {
        Self {
            wire: self.wire.as_nullable(),
            client: self.client.as_nullable(),
        }
    }
}

/// Resolve a type expression.
pub fn map_type(ctx: &MapperContext<'_>, expr: &TypeExpr) -> Result<MappedType> {
    match expr {
        TypeExpr::Primitive(kind) => Ok(map_primitive(ctx, *kind)),
        TypeExpr::Array(inner) => {
            let inner = map_type(ctx, inner)?;
            Ok(MappedType::same(IType::list(inner.client)))
        }
        TypeExpr::Dict(inner) => {
            let inner = map_type(ctx, inner)?;
            Ok(MappedType::same(IType::map(inner.client)))
        }
        TypeExpr::Named(name) => map_named(ctx, name),
    }
}

fn map_primitive(ctx: &MapperContext<'_>, kind: PrimitiveKind) -> MappedType {
    let runtime = &ctx.runtime;
    match kind {
        PrimitiveKind::String | PrimitiveKind::Url => MappedType::same(IType::string()),
        PrimitiveKind::Boolean => MappedType::same(IType::BOOLEAN),
        PrimitiveKind::Int32 => MappedType::same(IType::INT),
        PrimitiveKind::Int64 => MappedType::same(IType::LONG),
        PrimitiveKind::Float32 => MappedType::same(IType::FLOAT),
        PrimitiveKind::Float64 => MappedType::same(IType::DOUBLE),
        PrimitiveKind::Decimal => MappedType::same(IType::big_decimal()),
        PrimitiveKind::Date => MappedType::same(IType::local_date()),
        PrimitiveKind::DateTime => MappedType::same(IType::offset_date_time()),
        PrimitiveKind::DateTimeRfc1123 => MappedType {
            wire: runtime.ty(RuntimeClass::DateTimeRfc1123),
            client: IType::offset_date_time(),
        },
        PrimitiveKind::UnixTime => MappedType {
            wire: IType::LONG,
            client: IType::offset_date_time(),
        },
        PrimitiveKind::Duration => MappedType::same(IType::duration()),
        PrimitiveKind::Uuid => MappedType::same(IType::uuid()),
        PrimitiveKind::Bytes => MappedType::same(IType::ByteArray),
        PrimitiveKind::Base64Url => MappedType {
            wire: runtime.ty(RuntimeClass::Base64Url),
            client: IType::ByteArray,
        },
        PrimitiveKind::Binary => MappedType::same(runtime.ty(RuntimeClass::BinaryData)),
        PrimitiveKind::Any if runtime.is_azure() => {
            MappedType::same(runtime.ty(RuntimeClass::BinaryData))
        }
        PrimitiveKind::Any => MappedType::same(IType::object()),
    }
}

fn map_named(ctx: &MapperContext<'_>, name: &str) -> Result<MappedType> {
    let schema = ctx
        .code_model
        .schema(name)
        .ok_or_else(|| eyre!("unresolved type reference '{name}'"))?;

    Ok(match schema {
        SchemaRef::Object(object) => MappedType::same(IType::Model(ctx.model_class(object))),
        SchemaRef::Choice(choice) => MappedType::same(enums::enum_ref(ctx, choice, true)?),
        SchemaRef::SealedChoice(choice) => MappedType::same(enums::enum_ref(ctx, choice, false)?),
        SchemaRef::Constant(constant) => map_type(ctx, &constant.value_type)?,
        SchemaRef::Union(_) => MappedType::same(ctx.runtime.ty(RuntimeClass::BinaryData)),
    })
}
