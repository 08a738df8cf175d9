//! Model classes with stream-style JSON serialization.

use std::collections::HashSet;

use javagen_codegen::{RuntimeClass, builder::Renderable};
use javagen_codemodel::Settings;
use javagen_ir::{
    ClientModel, ClientModelProperty, ClientModels, IType, PolymorphicDiscriminator,
    PrimitiveType, quote,
};

use super::class_marker;
use crate::ast::{
    JavaAnnotation, JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc,
    JavaMethod, JavaModifiers,
};

pub(crate) const MERGE_PATCH_HELPER: &str = javagen_ir::JSON_MERGE_PATCH_HELPER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Own,
    /// Read-only property of a runtime base class, redeclared as a field.
    Shadowed,
    /// Reached through the accessors of an ancestor.
    Inherited,
}

#[derive(Debug, Clone, Copy)]
struct Member<'a> {
    property: &'a ClientModelProperty,
    declared_by: &'a ClientModel,
    origin: Origin,
}

impl Member<'_> {
    fn has_field(&self) -> bool {
        self.origin != Origin::Inherited
    }

    fn is_constant(&self) -> bool {
        self.property.constant_value.is_some() && !self.property.is_discriminator
    }
}

/// Whether `owner` exposes a public setter for `property`.
fn has_public_setter(owner: &ClientModel, property: &ClientModelProperty) -> bool {
    property.has_setter() && !owner.immutable
}

/// Whether `model` registers an accessor with the merge patch helper.
pub(crate) fn has_merge_patch_accessor(model: &ClientModel) -> bool {
    model.is_merge_patch() && (model.parent.is_none() || !model.derived_models.is_empty())
}

/// Properties of `model` its subclasses set through the merge patch accessor.
pub(crate) fn accessor_setters(model: &ClientModel) -> Vec<&ClientModelProperty> {
    if model.derived_models.is_empty() {
        return Vec::new();
    }
    model
        .properties
        .iter()
        .filter(|p| !p.is_discriminator && p.constant_value.is_none())
        .chain(model.additional_properties.as_ref())
        .collect()
}

fn initial_value(ty: &IType) -> &'static str {
    match ty {
        IType::Primitive(PrimitiveType::Boolean) => "false",
        IType::Primitive(PrimitiveType::Long) => "0L",
        IType::Primitive(PrimitiveType::Float) => "0.0f",
        IType::Primitive(PrimitiveType::Double) => "0.0",
        IType::Primitive(_) => "0",
        _ => "null",
    }
}

/// `if` for the first branch of a chain, `else if` for the others.
fn chain_header(index: usize, condition: &str) -> String {
    if index == 0 {
        format!("if ({condition}) {{")
    } else {
        format!("else if ({condition}) {{")
    }
}

fn setter_javadoc(model: &ClientModel, property: &ClientModelProperty) -> JavaJavadoc {
    JavaJavadoc::new(format!(
        "Set the {} property: {}",
        property.name, property.description
    ))
    .param(&property.name, format!("the {} value to set.", property.name))
    .returns(format!("the {} object itself.", model.name))
}

/// Renders one model class.
pub struct ModelTemplate<'a> {
    settings: &'a Settings,
    models: &'a ClientModels,
    model: &'a ClientModel,
}

impl<'a> ModelTemplate<'a> {
    pub fn new(settings: &'a Settings, models: &'a ClientModels, model: &'a ClientModel) -> Self {
        Self {
            settings,
            models,
            model,
        }
    }

    /// Everything the class serializes: inherited properties root first, then its own.
    fn members(&self) -> Vec<Member<'a>> {
        let model = self.model;
        let ancestors = self.models.ancestors(model);
        let runtime_parent = ancestors.first().is_some_and(|a| a.external);
        let own: HashSet<&str> = model
            .properties
            .iter()
            .map(|p| p.serialized_name.as_str())
            .collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut members = Vec::new();
        for ancestor in ancestors.into_iter().rev() {
            for property in &ancestor.properties {
                let name = property.serialized_name.as_str();
                if own.contains(name) || !seen.insert(name) {
                    continue;
                }
                let origin = if runtime_parent && ancestor.external && !property.has_setter() {
                    Origin::Shadowed
                } else {
                    Origin::Inherited
                };
                members.push(Member {
                    property,
                    declared_by: ancestor,
                    origin,
                });
            }
        }
        members.extend(model.properties.iter().map(|property| Member {
            property,
            declared_by: model,
            origin: Origin::Own,
        }));
        members
    }

    fn merge_patch_root(&self) -> &'a ClientModel {
        self.models.polymorphic_root(self.model)
    }

    fn helper(&self, ctx: &mut JavaContext) -> &'static str {
        ctx.import(format!(
            "{}.{MERGE_PATCH_HELPER}",
            self.settings.implementation_package()
        ));
        MERGE_PATCH_HELPER
    }

    pub fn render(&self) -> JavaFile {
        let model = self.model;
        let mut ctx = JavaContext::new(self.settings, &model.package);
        let members = self.members();
        let merge_patch = model.is_merge_patch();

        let modifiers = if model.derived_models.is_empty() {
            JavaModifiers::PUBLIC | JavaModifiers::FINAL
        } else {
            JavaModifiers::PUBLIC
        };
        let mut class = JavaClass::class(modifiers, &model.name)
            .javadoc(JavaJavadoc::new(&model.description))
            .annotate(class_marker(&mut ctx, model.immutable));
        if model.deprecated {
            class = class.annotate(JavaAnnotation::new("Deprecated"));
        }
        class = match &model.parent {
            Some(parent) => {
                let parent = ctx.use_class(parent);
                class.extends(parent)
            }
            None => {
                let serializable = ctx.runtime_class(RuntimeClass::JsonSerializable);
                class.implements(format!("{serializable}<{}>", model.name))
            }
        };

        let fields: Vec<Member> = members
            .iter()
            .filter(|m| m.origin == Origin::Own)
            .chain(members.iter().filter(|m| m.origin == Origin::Shadowed))
            .copied()
            .collect();
        for member in &fields {
            class.add_field(self.field(&mut ctx, member));
        }
        let additional = model.additional_properties.as_ref().map(|property| Member {
            property,
            declared_by: model,
            origin: Origin::Own,
        });
        if let Some(member) = &additional {
            class.add_field(self.field(&mut ctx, member));
        }

        if merge_patch {
            self.add_merge_patch_state(&mut ctx, &mut class);
        }

        class.add_method(self.constructor(&mut ctx));

        for member in &members {
            let property = member.property;
            match member.origin {
                Origin::Own | Origin::Shadowed => {
                    class.add_method(self.getter(&mut ctx, member));
                    if member.origin == Origin::Own && has_public_setter(model, property) {
                        class.add_method(self.setter(&mut ctx, property));
                    } else if self.needs_package_setter(member) {
                        class.add_method(self.package_setter(&mut ctx, property));
                    }
                }
                Origin::Inherited => {
                    if !model.immutable && has_public_setter(member.declared_by, property) {
                        class.add_method(self.overriding_setter(&mut ctx, property));
                    }
                }
            }
        }
        if let Some(member) = &additional {
            class.add_method(self.getter(&mut ctx, member));
            if has_public_setter(model, member.property) {
                class.add_method(self.setter(&mut ctx, member.property));
            } else if !model.derived_models.is_empty() {
                class.add_method(self.package_setter(&mut ctx, member.property));
            }
        }

        class.add_method(self.to_json(&mut ctx, &members));
        if merge_patch {
            class.add_method(self.to_json_merge_patch(&mut ctx, &members));
        }
        class.add_methods(self.from_json(&mut ctx, &members));

        ctx.into_file(&model.name).add(class)
    }

    /// Subclasses set read-only properties of their parent while deserializing.
    fn needs_package_setter(&self, member: &Member) -> bool {
        let property = member.property;
        !self.model.derived_models.is_empty()
            && !self.model.is_merge_patch()
            && !property.is_discriminator
            && !property.in_constructor
            && property.constant_value.is_none()
            && !has_public_setter(self.model, property)
    }

    fn field(&self, ctx: &mut JavaContext, member: &Member) -> JavaField {
        let property = member.property;
        let ty = ctx.use_json_type(&property.wire_type);
        ctx.use_type(&property.client_type);

        let mut modifiers = JavaModifiers::PRIVATE;
        if member.origin == Origin::Own && (member.is_constant() || property.in_constructor) {
            modifiers = modifiers | JavaModifiers::FINAL;
        }

        let initializer = if property.is_discriminator {
            property.default_value.as_ref()
        } else if member.is_constant() {
            property.constant_value.as_ref()
        } else if !property.in_constructor {
            property.default_value.as_ref()
        } else {
            None
        };

        let generated = ctx.generated();
        let mut field = JavaField::new(modifiers, ty, &property.name)
            .comment(&property.description)
            .annotate(generated);
        if let Some(value) = initializer {
            ctx.import_all(property.wire_type.conversion_imports(&property.client_type));
            field = field.init(
                property
                    .wire_type
                    .client_to_wire_expr(&property.client_type, value),
            );
        }
        field
    }

    fn add_merge_patch_state(&self, ctx: &mut JavaContext, class: &mut JavaClass) {
        let model = self.model;
        ctx.import_all(["java.util.Set", "java.util.HashSet"]);

        let generated = ctx.generated();
        class.add_field(
            JavaField::new(
                JavaModifiers::PRIVATE | JavaModifiers::FINAL,
                "Set<String>",
                "updatedProperties",
            )
            .comment("Stores updated model property, the value is property name, not serialized name.")
            .annotate(generated.clone())
            .init("new HashSet<>()"),
        );

        if model.parent.is_none() {
            class.add_field(
                JavaField::new(JavaModifiers::PRIVATE, "boolean", "jsonMergePatch")
                    .annotate(generated.clone()),
            );
            class.add_method(
                JavaMethod::new(JavaModifiers::PRIVATE, "void", "serializeAsJsonMergePatch")
                    .annotate(generated)
                    .param("boolean jsonMergePatch")
                    .body(JavaBlock::new().line("this.jsonMergePatch = jsonMergePatch;")),
            );
        }

        if has_merge_patch_accessor(model) {
            let registration = self.accessor_registration(ctx);
            class.add_fragments(registration.to_fragments());
        }
    }

    /// The static block handing the merge patch accessor to the helper.
    fn accessor_registration(&self, ctx: &mut JavaContext) -> JavaBlock {
        let model = self.model;
        let name = &model.name;
        let helper = self.helper(ctx);

        let mut body = JavaBlock::new();
        let mut first = true;
        let mut add = |body: JavaBlock, method: JavaMethod| {
            let body = if first { body } else { body.blank() };
            first = false;
            body.emit(&method)
        };

        if model.parent.is_none() {
            body = add(
                body,
                JavaMethod::new(JavaModifiers::PUBLIC, name, "prepareModelForJsonMergePatch")
                    .annotate(JavaAnnotation::overrides())
                    .param(format!("{name} model"))
                    .param("boolean jsonMergePatchEnabled")
                    .body(
                        JavaBlock::new()
                            .line("model.serializeAsJsonMergePatch(jsonMergePatchEnabled);")
                            .line("return model;"),
                    ),
            );
            body = add(
                body,
                JavaMethod::new(JavaModifiers::PUBLIC, "boolean", "isJsonMergePatch")
                    .annotate(JavaAnnotation::overrides())
                    .param(format!("{name} model"))
                    .body(JavaBlock::new().line("return model.jsonMergePatch;")),
            );
        }
        for property in accessor_setters(model) {
            let ty = ctx.use_type(&property.client_type);
            let value = property
                .wire_type
                .client_to_wire_expr(&property.client_type, &property.name);
            body = add(
                body,
                JavaMethod::new(JavaModifiers::PUBLIC, "void", &property.setter_name)
                    .annotate(JavaAnnotation::overrides())
                    .param(format!("{name} model"))
                    .param(format!("{ty} {}", property.name))
                    .body(JavaBlock::new().line(format!("model.{} = {value};", property.name))),
            );
        }

        JavaBlock::new().block(
            "static {",
            JavaBlock::new().block_with_close(
                format!("{helper}.set{name}Accessor(new {helper}.{name}Accessor() {{"),
                body,
                "});",
            ),
        )
    }

    fn constructor(&self, ctx: &mut JavaContext) -> JavaMethod {
        let model = self.model;
        let parameters = self.models.constructor_properties(model);
        let modifiers = if !model.immutable {
            JavaModifiers::PUBLIC
        } else if model.derived_models.is_empty() {
            JavaModifiers::PRIVATE
        } else {
            JavaModifiers::PROTECTED
        };

        let mut javadoc = JavaJavadoc::new(format!("Creates an instance of {} class.", model.name));
        let mut body = JavaBlock::new();
        let (own, inherited): (Vec<&ClientModelProperty>, Vec<&ClientModelProperty>) = parameters
            .iter()
            .partition(|p| model.property_by_serialized_name(&p.serialized_name).is_some());
        if !inherited.is_empty() {
            let names: Vec<&str> = inherited.iter().map(|p| p.name.as_str()).collect();
            body.push_line(format!("super({});", names.join(", ")));
        }
        for property in own {
            ctx.import_all(property.wire_type.conversion_imports(&property.client_type));
            body.push_line(format!(
                "this.{} = {};",
                property.name,
                property
                    .wire_type
                    .client_to_wire_expr(&property.client_type, &property.name)
            ));
        }

        let mut declarations = Vec::new();
        for property in &parameters {
            javadoc = javadoc.param(&property.name, format!("the {} value to set.", property.name));
            declarations.push(format!("{} {}", ctx.use_type(&property.client_type), property.name));
        }

        JavaMethod::constructor(modifiers, &model.name)
            .javadoc(javadoc)
            .annotate(ctx.generated())
            .params(declarations)
            .body(body)
    }

    fn getter(&self, ctx: &mut JavaContext, member: &Member) -> JavaMethod {
        let property = member.property;
        let ty = ctx.use_type(&property.client_type);
        ctx.import_all(property.wire_type.conversion_imports(&property.client_type));
        let value = property
            .wire_type
            .wire_to_client_expr(&property.client_type, &format!("this.{}", property.name));
        let overrides = member.origin == Origin::Shadowed
            || self
                .models
                .ancestors(self.model)
                .iter()
                .any(|a| a.property_by_serialized_name(&property.serialized_name).is_some());

        let mut getter = JavaMethod::new(JavaModifiers::PUBLIC, ty, &property.getter_name)
            .javadoc(
                JavaJavadoc::new(format!(
                    "Get the {} property: {}",
                    property.name, property.description
                ))
                .returns(format!("the {} value.", property.name)),
            )
            .annotate(ctx.generated());
        if overrides {
            getter = getter.annotate(JavaAnnotation::overrides());
        }
        if property.deprecated {
            getter = getter.annotate(JavaAnnotation::new("Deprecated"));
        }
        getter.body(JavaBlock::new().line(format!("return {value};")))
    }

    fn setter(&self, ctx: &mut JavaContext, property: &ClientModelProperty) -> JavaMethod {
        let model = self.model;
        let ty = ctx.use_type(&property.client_type);
        let value = property
            .wire_type
            .client_to_wire_expr(&property.client_type, &property.name);
        let body = JavaBlock::new()
            .line(format!("this.{} = {value};", property.name))
            .when(model.is_merge_patch(), |b| {
                b.line(format!("this.updatedProperties.add(\"{}\");", property.name))
            })
            .line("return this;");

        let mut setter = JavaMethod::new(JavaModifiers::PUBLIC, &model.name, &property.setter_name)
            .javadoc(setter_javadoc(model, property))
            .annotate(ctx.generated());
        if property.deprecated {
            setter = setter.annotate(JavaAnnotation::new("Deprecated"));
        }
        setter.param(format!("{ty} {}", property.name)).body(body)
    }

    fn package_setter(&self, ctx: &mut JavaContext, property: &ClientModelProperty) -> JavaMethod {
        let model = self.model;
        let ty = ctx.use_type(&property.client_type);
        let value = property
            .wire_type
            .client_to_wire_expr(&property.client_type, &property.name);
        JavaMethod::new(JavaModifiers::NONE, &model.name, &property.setter_name)
            .javadoc(setter_javadoc(model, property))
            .annotate(ctx.generated())
            .param(format!("{ty} {}", property.name))
            .body(
                JavaBlock::new()
                    .line(format!("this.{} = {value};", property.name))
                    .line("return this;"),
            )
    }

    /// Redeclares an inherited setter so that chained calls keep the subclass type.
    fn overriding_setter(&self, ctx: &mut JavaContext, property: &ClientModelProperty) -> JavaMethod {
        let model = self.model;
        let ty = ctx.use_type(&property.client_type);
        let body = JavaBlock::new()
            .line(format!("super.{}({});", property.setter_name, property.name))
            .when(model.is_merge_patch(), |b| {
                b.line(format!("this.updatedProperties.add(\"{}\");", property.name))
            })
            .line("return this;");
        JavaMethod::new(JavaModifiers::PUBLIC, &model.name, &property.setter_name)
            .javadoc(JavaJavadoc::new("{@inheritDoc}"))
            .annotate(ctx.generated())
            .annotate(JavaAnnotation::overrides())
            .param(format!("{ty} {}", property.name))
            .body(body)
    }

    /// The wire value of `member` as seen from inside the class.
    fn wire_value(&self, ctx: &mut JavaContext, member: &Member) -> String {
        let property = member.property;
        ctx.use_json_type(&property.wire_type);
        if member.has_field() {
            format!("this.{}", property.name)
        } else {
            ctx.import_all(property.wire_type.conversion_imports(&property.client_type));
            property
                .wire_type
                .client_to_wire_expr(&property.client_type, &format!("{}()", property.getter_name))
        }
    }

    /// The additional properties the class collects, declared here or inherited.
    fn additional_member(&self) -> Option<Member<'a>> {
        let (declared_by, property) = self.models.additional_properties(self.model)?;
        let origin = if std::ptr::eq(declared_by, self.model) {
            Origin::Own
        } else {
            Origin::Inherited
        };
        Some(Member {
            property,
            declared_by,
            origin,
        })
    }

    /// Writes every additional property as a field of its own.
    fn write_additional_properties(&self, ctx: &mut JavaContext) -> JavaBlock {
        let Some(member) = self.additional_member() else {
            return JavaBlock::new();
        };
        let Some(value_type) = member.property.wire_type.map_value().map(IType::as_nullable) else {
            return JavaBlock::new();
        };
        ctx.import("java.util.Map");
        let entry = ctx.use_json_type(&value_type);
        let map = self.wire_value(ctx, &member);
        let write = value_type.json_write_expr("jsonWriter", None, "additionalProperty.getValue()");

        JavaBlock::new().block(
            format!("if ({map} != null) {{"),
            JavaBlock::new().block(
                format!("for (Map.Entry<String, {entry}> additionalProperty : {map}.entrySet()) {{"),
                JavaBlock::new()
                    .line("jsonWriter.writeFieldName(additionalProperty.getKey());")
                    .line(format!("{write};")),
            ),
        )
    }

    /// Members written to JSON, discriminators first.
    fn written<'m>(&self, members: &'m [Member<'a>]) -> Vec<&'m Member<'a>> {
        let discriminators = members.iter().filter(|m| m.property.is_discriminator);
        let others = members
            .iter()
            .filter(|m| !m.property.is_discriminator && !m.property.read_only);
        discriminators.chain(others).collect()
    }

    fn to_json(&self, ctx: &mut JavaContext, members: &[Member<'a>]) -> JavaMethod {
        let writer = ctx.runtime_class(RuntimeClass::JsonWriter);
        ctx.import("java.io.IOException");

        let mut write = JavaBlock::new().line("jsonWriter.writeStartObject();");
        for member in self.written(members) {
            let property = member.property;
            let value = self.wire_value(ctx, member);
            write.push_line(format!(
                "{};",
                property
                    .wire_type
                    .json_write_expr("jsonWriter", Some(&property.serialized_name), &value)
            ));
        }
        write = write
            .append(self.write_additional_properties(ctx))
            .line("return jsonWriter.writeEndObject();");

        let body = if self.model.is_merge_patch() {
            let condition = if self.model.parent.is_none() {
                "if (jsonMergePatch) {".to_string()
            } else {
                let helper = self.helper(ctx);
                format!(
                    "if ({helper}.get{}Accessor().isJsonMergePatch(this)) {{",
                    self.merge_patch_root().name
                )
            };
            JavaBlock::new().branches(vec![
                (
                    condition,
                    JavaBlock::new().line("return toJsonMergePatch(jsonWriter);"),
                ),
                ("else {".to_string(), write),
            ])
        } else {
            write
        };

        JavaMethod::new(JavaModifiers::PUBLIC, &writer, "toJson")
            .javadoc(JavaJavadoc::new("{@inheritDoc}"))
            .annotate(ctx.generated())
            .annotate(JavaAnnotation::overrides())
            .param(format!("{writer} jsonWriter"))
            .throws("IOException")
            .body(body)
    }

    fn to_json_merge_patch(&self, ctx: &mut JavaContext, members: &[Member<'a>]) -> JavaMethod {
        let writer = ctx.runtime_class(RuntimeClass::JsonWriter);
        let mut body = JavaBlock::new().line("jsonWriter.writeStartObject();");

        for member in self.written(members) {
            let property = member.property;
            let value = self.wire_value(ctx, member);
            let write = format!(
                "{};",
                property
                    .wire_type
                    .json_write_expr("jsonWriter", Some(&property.serialized_name), &value)
            );
            if property.is_discriminator || member.is_constant() {
                body.push_line(write);
                continue;
            }

            let nested_root = property
                .wire_type
                .as_model()
                .filter(|class| self.models.is_merge_patch(&class.name))
                .and_then(|class| self.models.model(&class.name))
                .map(|nested| self.models.polymorphic_root(nested).name.clone());
            let present = match nested_root {
                Some(root) => {
                    let helper = self.helper(ctx);
                    let prepare = |enabled: bool| {
                        format!(
                            "{helper}.get{root}Accessor().prepareModelForJsonMergePatch({value}, {enabled});"
                        )
                    };
                    JavaBlock::new()
                        .line(prepare(true))
                        .line(write)
                        .line(prepare(false))
                }
                None => JavaBlock::new().line(write),
            };

            let updated = if property.wire_type.is_nullable() {
                JavaBlock::new().branches(vec![
                    (
                        format!("if ({value} == null) {{"),
                        JavaBlock::new().line(format!(
                            "jsonWriter.writeNullField(\"{}\");",
                            property.serialized_name
                        )),
                    ),
                    ("else {".to_string(), present),
                ])
            } else {
                present
            };
            body.push_block(
                format!("if (updatedProperties.contains(\"{}\")) {{", property.name),
                updated,
            );
        }
        body = body
            .append(self.write_additional_properties(ctx))
            .line("return jsonWriter.writeEndObject();");

        JavaMethod::new(JavaModifiers::PRIVATE, &writer, "toJsonMergePatch")
            .annotate(ctx.generated())
            .param(format!("{writer} jsonWriter"))
            .throws("IOException")
            .body(body)
    }

    fn from_json(&self, ctx: &mut JavaContext, members: &[Member<'a>]) -> Vec<JavaMethod> {
        let model = self.model;
        let name = &model.name;
        let reader = ctx.runtime_class(RuntimeClass::JsonReader);
        ctx.runtime_class(RuntimeClass::JsonToken);
        ctx.import("java.io.IOException");

        let mut javadoc = JavaJavadoc::new(format!("Reads an instance of {name} from the JsonReader."))
            .param("jsonReader", "The JsonReader being read.")
            .returns(format!(
                "An instance of {name} if the JsonReader was pointing to an instance of it, or null if it was pointing to JSON null."
            ));
        if model.is_polymorphic_parent || !self.models.constructor_properties(model).is_empty() {
            javadoc = javadoc.throws(
                "IllegalStateException",
                "If the deserialized JSON object was missing any required properties.",
            );
        }
        javadoc = javadoc.throws("IOException", format!("If an error occurs while reading {name}."));

        let read = JavaBlock::new().block_with_close(
            "return jsonReader.readObject(reader -> {",
            self.read_object(ctx, members),
            "});",
        );
        let from_json = JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, "fromJson")
            .javadoc(javadoc)
            .annotate(ctx.generated())
            .param(format!("{reader} jsonReader"))
            .throws("IOException");

        match model.discriminator.as_ref().filter(|_| model.is_polymorphic_parent) {
            Some(discriminator) => {
                let dispatch = self.dispatch(ctx, discriminator, &reader);
                vec![
                    from_json.body(dispatch),
                    JavaMethod::new(JavaModifiers::STATIC, name, "fromJsonKnownDiscriminator")
                        .annotate(ctx.generated())
                        .param(format!("{reader} jsonReader"))
                        .throws("IOException")
                        .body(read),
                ]
            }
            None => vec![from_json.body(read)],
        }
    }

    /// Derived models `fromJson` hands over to, with their discriminator values.
    fn subtypes(&self, discriminator: &PolymorphicDiscriminator) -> Vec<(&'a str, &'a ClientModel)> {
        let mut seen = HashSet::new();
        let mut subtypes = Vec::new();
        for class in &self.model.derived_models {
            let Some(derived) = self.models.model(&class.name) else {
                continue;
            };
            let Some(own) = derived.discriminator.as_ref() else {
                continue;
            };
            let shares = own.declared_by == discriminator.declared_by;
            let nests = own.declared_by == derived.name
                && self
                    .models
                    .ancestors(derived)
                    .first()
                    .and_then(|parent| parent.discriminator.as_ref())
                    .is_some_and(|outer| outer.declared_by == discriminator.declared_by);
            if !(shares || nests) {
                continue;
            }
            if let Some(value) = derived.discriminator_value.as_deref() {
                if seen.insert(value) {
                    subtypes.push((value, derived));
                }
            }
        }
        subtypes
    }

    fn dispatch(
        &self,
        ctx: &mut JavaContext,
        discriminator: &PolymorphicDiscriminator,
        reader: &str,
    ) -> JavaBlock {
        let scan = JavaBlock::new()
            .line("String fieldName = readerToUse.getFieldName();")
            .line("readerToUse.nextToken();")
            .branches(vec![
                (
                    format!(
                        "if ({}.equals(fieldName)) {{",
                        quote(&discriminator.serialized_name)
                    ),
                    JavaBlock::new()
                        .line("discriminatorValue = readerToUse.getString();")
                        .line("break;"),
                ),
                (
                    "else {".to_string(),
                    JavaBlock::new().line("readerToUse.skipChildren();"),
                ),
            ]);

        let mut branches = Vec::new();
        for (index, (value, derived)) in self.subtypes(discriminator).into_iter().enumerate() {
            let class = ctx.use_class(&derived.class_type());
            branches.push((
                chain_header(index, &format!("{}.equals(discriminatorValue)", quote(value))),
                JavaBlock::new().line(format!("return {class}.fromJson(readerToUse.reset());")),
            ));
        }
        let fallback = JavaBlock::new().line("return fromJsonKnownDiscriminator(readerToUse.reset());");
        let select = if branches.is_empty() {
            fallback
        } else {
            branches.push(("else {".to_string(), fallback));
            JavaBlock::new().branches(branches)
        };

        let buffered = JavaBlock::new()
            .line("readerToUse.nextToken(); // Prepare for reading")
            .block("while (readerToUse.nextToken() != JsonToken.END_OBJECT) {", scan)
            .line("// Use the discriminator value to determine which subtype should be deserialized.")
            .append(select);

        JavaBlock::new().block_with_close(
            "return jsonReader.readObject(reader -> {",
            JavaBlock::new()
                .line("String discriminatorValue = null;")
                .block(format!("try ({reader} readerToUse = reader.bufferObject()) {{"), buffered),
            "});",
        )
    }

    /// Statement setting an inherited property on `target`.
    fn set_inherited(&self, ctx: &mut JavaContext, member: &Member, target: &str, value: &str) -> String {
        let property = member.property;
        if self.model.is_merge_patch() {
            let helper = self.helper(ctx);
            format!(
                "{helper}.get{}Accessor().{}({target}, {value});",
                member.declared_by.name, property.setter_name
            )
        } else {
            format!("{target}.{}({value});", property.setter_name)
        }
    }

    /// Body of the `readObject` lambda for a known type.
    fn read_object(&self, ctx: &mut JavaContext, members: &[Member<'a>]) -> JavaBlock {
        let model = self.model;
        let name = &model.name;
        let target = format!("deserialized{name}");
        let readable: Vec<&Member> = members.iter().filter(|m| !m.is_constant()).collect();
        let constructor = self.models.constructor_properties(model);

        let mut body = JavaBlock::new();
        let mut branches = Vec::new();
        if constructor.is_empty() {
            body.push_line(format!("{name} {target} = new {name}();"));
        }
        for (index, member) in readable.iter().enumerate() {
            let property = member.property;
            let ty = ctx.use_json_type(&property.wire_type);
            let read = property.wire_type.json_read_expr("reader");
            let condition = chain_header(
                index,
                &format!("{}.equals(fieldName)", quote(&property.serialized_name)),
            );

            let branch = if !constructor.is_empty() {
                body.push_line(format!(
                    "{ty} {} = {};",
                    property.name,
                    initial_value(&property.wire_type)
                ));
                JavaBlock::new().line(format!("{} = {read};", property.name))
            } else if member.has_field() {
                JavaBlock::new().line(format!("{target}.{} = {read};", property.name))
            } else if property.has_conversion() {
                ctx.import_all(property.wire_type.conversion_imports(&property.client_type));
                let value = property
                    .wire_type
                    .wire_to_client_expr(&property.client_type, &property.name);
                let set = self.set_inherited(ctx, member, &target, &value);
                JavaBlock::new()
                    .line(format!("{ty} {} = {read};", property.name))
                    .line(set)
            } else {
                JavaBlock::new().line(self.set_inherited(ctx, member, &target, &read))
            };
            branches.push((condition, branch));
        }

        let additional = self.additional_member();
        let unknown = match &additional {
            Some(member) => {
                let property = member.property;
                let ty = ctx.use_json_type(&property.wire_type);
                body.push_line(format!("{ty} {} = null;", property.name));
                self.collect_additional_property(ctx, property)
            }
            None => JavaBlock::new().line("reader.skipChildren();"),
        };

        let mut scan = JavaBlock::new()
            .line("String fieldName = reader.getFieldName();")
            .line("reader.nextToken();")
            .blank();
        if branches.is_empty() {
            scan = scan.append(unknown);
        } else {
            branches.push(("else {".to_string(), unknown));
            scan = scan.branches(branches);
        }
        body.push_block("while (reader.nextToken() != JsonToken.END_OBJECT) {", scan);

        if !constructor.is_empty() {
            let args: Vec<String> = constructor
                .iter()
                .map(|p| p.wire_type.wire_to_client_expr(&p.client_type, &p.name))
                .collect();
            body.push_line(format!("{name} {target} = new {name}({});", args.join(", ")));
            for member in readable.iter().filter(|m| !m.property.in_constructor) {
                let property = member.property;
                let statement = if member.has_field() {
                    format!("{target}.{} = {};", property.name, property.name)
                } else {
                    let value = property
                        .wire_type
                        .wire_to_client_expr(&property.client_type, &property.name);
                    self.set_inherited(ctx, member, &target, &value)
                };
                body.push_line(statement);
            }
        }
        if let Some(member) = &additional {
            let property = member.property;
            let statement = if member.has_field() {
                format!("{target}.{} = {};", property.name, property.name)
            } else {
                self.set_inherited(ctx, member, &target, &property.name)
            };
            body.push_line(statement);
        }
        if !constructor.is_empty() || additional.is_some() {
            body = body.blank();
        }

        body.line(format!("return {target};"))
    }

    /// Puts the current field into the additional properties map.
    fn collect_additional_property(&self, ctx: &mut JavaContext, property: &ClientModelProperty) -> JavaBlock {
        ctx.import("java.util.LinkedHashMap");
        let read = property
            .wire_type
            .map_value()
            .map(|value| value.as_nullable().json_read_expr("reader"))
            .unwrap_or_else(|| "reader.readUntyped()".to_string());
        let name = &property.name;
        JavaBlock::new()
            .block(
                format!("if ({name} == null) {{"),
                JavaBlock::new().line(format!("{name} = new LinkedHashMap<>();")),
            )
            .blank()
            .line(format!("{name}.put(fieldName, {read});"))
    }
}
