//! Sealed and expandable enums.

use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{ClientEnumValue, EnumType, IType, PrimitiveType};

use crate::ast::{
    JavaAnnotation, JavaBlock, JavaClass, JavaContext, JavaEnumConstant, JavaField, JavaFile,
    JavaJavadoc, JavaMethod, JavaModifiers,
};

/// Renders one enum, as a Java `enum` when sealed and as a class with
/// static instances when expandable.
pub struct EnumTemplate<'a> {
    settings: &'a Settings,
    enum_type: &'a EnumType,
}

fn value_javadoc(value: &ClientEnumValue, fallback: String) -> JavaJavadoc {
    JavaJavadoc::new(value.description.clone().unwrap_or(fallback))
}

impl<'a> EnumTemplate<'a> {
    pub fn new(settings: &'a Settings, enum_type: &'a EnumType) -> Self {
        Self {
            settings,
            enum_type,
        }
    }

    pub fn render(&self) -> JavaFile {
        let mut ctx = JavaContext::new(self.settings, &self.enum_type.package);
        let declaration = if !self.enum_type.expandable {
            self.sealed(&mut ctx)
        } else if ctx.is_azure() && self.enum_type.element_type.is_string() {
            self.expandable_string(&mut ctx)
        } else {
            self.expandable(&mut ctx)
        };
        ctx.into_file(&self.enum_type.name).add(declaration)
    }

    fn sealed(&self, ctx: &mut JavaContext) -> JavaClass {
        let e = self.enum_type;
        let name = &e.name;
        let ty = ctx.use_type(&e.element_type);
        let is_string = e.element_type.is_string();

        let mut declaration = JavaClass::enumeration(JavaModifiers::PUBLIC, name)
            .javadoc(JavaJavadoc::new(&e.description));
        for value in &e.values {
            declaration = declaration.constant(JavaEnumConstant {
                javadoc: Some(value_javadoc(value, format!("Enum value {}.", value.value))),
                annotations: Vec::new(),
                text: format!(
                    "{}({})",
                    value.name,
                    e.element_type.default_value_expr(&value.value)
                ),
            });
        }

        let item = format!("item.{}()", e.to_method);
        let compare = match &e.element_type {
            _ if is_string => format!("{item}.equalsIgnoreCase(value)"),
            IType::Primitive(PrimitiveType::Float) => {
                format!("Float.floatToIntBits({item}) == Float.floatToIntBits(value)")
            }
            IType::Primitive(PrimitiveType::Double) => {
                format!("Double.doubleToLongBits({item}) == Double.doubleToLongBits(value)")
            }
            IType::Primitive(_) => format!("{item} == value"),
            _ => format!("{item}.equals(value)"),
        };
        let mut parse = JavaBlock::new();
        if e.element_type.is_nullable() {
            parse.push_block("if (value == null) {", JavaBlock::new().line("return null;"));
        }
        parse = parse
            .line(format!("{name}[] items = {name}.values();"))
            .block(
                format!("for ({name} item : items) {{"),
                JavaBlock::new().block(format!("if ({compare}) {{"), JavaBlock::new().line("return item;")),
            )
            .line("return null;");

        let mut to_value = JavaMethod::new(JavaModifiers::PUBLIC, &ty, &e.to_method);
        to_value = if is_string {
            to_value
                .javadoc(JavaJavadoc::new("{@inheritDoc}"))
                .annotate(JavaAnnotation::overrides())
        } else {
            to_value.javadoc(
                JavaJavadoc::new(format!("De-serializes the instance to {ty} value."))
                    .returns(format!("the {ty} value.")),
            )
        };

        declaration
            .field(
                JavaField::new(JavaModifiers::PRIVATE | JavaModifiers::FINAL, &ty, "value")
                    .javadoc(JavaJavadoc::new(format!(
                        "The actual serialized value for a {name} instance."
                    ))),
            )
            .method(
                JavaMethod::constructor(JavaModifiers::NONE, name)
                    .param(format!("{ty} value"))
                    .body(JavaBlock::new().line("this.value = value;")),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, &e.from_method)
                    .javadoc(
                        JavaJavadoc::new(format!("Parses a serialized value to a {name} instance."))
                            .param("value", "the serialized value to parse.")
                            .returns(format!(
                                "the parsed {name} object, or null if unable to parse."
                            )),
                    )
                    .param(format!("{ty} value"))
                    .body(parse),
            )
            .method(to_value.body(JavaBlock::new().line("return this.value;")))
    }

    /// azure-core `ExpandableStringEnum` subclass.
    fn expandable_string(&self, ctx: &mut JavaContext) -> JavaClass {
        let e = self.enum_type;
        let name = &e.name;
        let base = ctx.runtime_class(RuntimeClass::ExpandableStringEnum);
        ctx.import("java.util.Collection");

        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, name)
            .javadoc(JavaJavadoc::new(&e.description))
            .extends(format!("{base}<{name}>"));
        for value in &e.values {
            class.add_field(
                JavaField::new(
                    JavaModifiers::PUBLIC | JavaModifiers::STATIC | JavaModifiers::FINAL,
                    name,
                    &value.name,
                )
                .javadoc(value_javadoc(
                    value,
                    format!("Static value {} for {name}.", value.value),
                ))
                .annotate(ctx.generated())
                .init(format!(
                    "{}({})",
                    e.from_method,
                    e.element_type.default_value_expr(&value.value)
                )),
            );
        }

        class.add_method(
            JavaMethod::constructor(JavaModifiers::PUBLIC, name)
                .javadoc(
                    JavaJavadoc::new(format!("Creates a new instance of {name} value."))
                        .tag("@deprecated Use the {@link #fromString(String)} factory method."),
                )
                .annotate(ctx.generated())
                .annotate(JavaAnnotation::new("Deprecated"))
                .body(JavaBlock::new()),
        );
        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, &e.from_method)
                .javadoc(
                    JavaJavadoc::new(format!(
                        "Creates or finds a {name} from its string representation."
                    ))
                    .param("name", "a name to look for.")
                    .returns(format!("the corresponding {name}.")),
                )
                .annotate(ctx.generated())
                .param("String name")
                .body(JavaBlock::new().line(format!("return fromString(name, {name}.class);"))),
        );
        class.add_method(
            JavaMethod::new(
                JavaModifiers::PUBLIC | JavaModifiers::STATIC,
                format!("Collection<{name}>"),
                "values",
            )
            .javadoc(
                JavaJavadoc::new(format!("Gets known {name} values."))
                    .returns(format!("known {name} values.")),
            )
            .annotate(ctx.generated())
            .body(JavaBlock::new().line(format!("return values({name}.class);"))),
        );
        class
    }

    /// `ExpandableEnum` implementation backed by a value cache.
    fn expandable(&self, ctx: &mut JavaContext) -> JavaClass {
        let e = self.enum_type;
        let name = &e.name;
        let ty = ctx.use_type(&e.element_type.as_nullable());
        let base = ctx.runtime_class(RuntimeClass::ExpandableEnum);
        ctx.import_all([
            "java.util.ArrayList",
            "java.util.Collection",
            "java.util.Map",
            "java.util.Objects",
            "java.util.concurrent.ConcurrentHashMap",
            "java.util.function.Function",
        ]);
        let static_final = JavaModifiers::PRIVATE | JavaModifiers::STATIC | JavaModifiers::FINAL;

        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, name)
            .javadoc(JavaJavadoc::new(&e.description))
            .implements(format!("{base}<{ty}>"));
        if !ctx.is_azure() {
            let serializable = ctx.runtime_class(RuntimeClass::JsonSerializable);
            class = class.implements(format!("{serializable}<{name}>"));
        }
        class = class
            .field(
                JavaField::new(static_final, format!("Map<{ty}, {name}>"), "VALUES")
                    .init("new ConcurrentHashMap<>()"),
            )
            .field(
                JavaField::new(static_final, format!("Function<{ty}, {name}>"), "NEW_INSTANCE")
                    .init(format!("{name}::new")),
            );
        for value in &e.values {
            class.add_field(
                JavaField::new(
                    JavaModifiers::PUBLIC | JavaModifiers::STATIC | JavaModifiers::FINAL,
                    name,
                    &value.name,
                )
                .javadoc(value_javadoc(
                    value,
                    format!("Static value {} for {name}.", value.value),
                ))
                .annotate(ctx.generated())
                .init(format!(
                    "{}({})",
                    e.from_method,
                    e.element_type.default_value_expr(&value.value)
                )),
            );
        }

        let generated = ctx.generated();
        let mut class = class
            .field(
                JavaField::new(JavaModifiers::PRIVATE | JavaModifiers::FINAL, &ty, "value")
                    .annotate(generated.clone()),
            )
            .method(
                JavaMethod::constructor(JavaModifiers::PRIVATE, name)
                    .param(format!("{ty} value"))
                    .body(JavaBlock::new().line("this.value = value;")),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, &e.from_method)
                    .javadoc(
                        JavaJavadoc::new(format!("Creates or finds a {name}."))
                            .param("value", "a value to look for.")
                            .returns(format!("the corresponding {name}."))
                            .throws("IllegalArgumentException", "if value is null."),
                    )
                    .annotate(generated.clone())
                    .param(format!("{ty} value"))
                    .body(
                        JavaBlock::new()
                            .block(
                                "if (value == null) {",
                                JavaBlock::new().line(
                                    "throw new IllegalArgumentException(\"'value' cannot be null.\");",
                                ),
                            )
                            .line("return VALUES.computeIfAbsent(value, NEW_INSTANCE);"),
                    ),
            )
            .method(
                JavaMethod::new(
                    JavaModifiers::PUBLIC | JavaModifiers::STATIC,
                    format!("Collection<{name}>"),
                    "values",
                )
                .javadoc(
                    JavaJavadoc::new(format!("Gets known {name} values."))
                        .returns(format!("Known {name} values.")),
                )
                .annotate(generated.clone())
                .body(JavaBlock::new().line("return new ArrayList<>(VALUES.values());")),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, &ty, &e.to_method)
                    .javadoc(
                        JavaJavadoc::new(format!("Gets the value of the {name} instance."))
                            .returns(format!("the value of the {name} instance.")),
                    )
                    .annotate(generated.clone())
                    .annotate(JavaAnnotation::overrides())
                    .body(JavaBlock::new().line("return this.value;")),
            );
        if !ctx.is_azure() {
            class.add_methods(self.json_methods(ctx));
        }
        class
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, "String", "toString")
                    .annotate(generated.clone())
                    .annotate(JavaAnnotation::overrides())
                    .body(JavaBlock::new().line("return Objects.toString(this.value);")),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, "boolean", "equals")
                    .annotate(generated.clone())
                    .annotate(JavaAnnotation::overrides())
                    .param("Object obj")
                    .body(JavaBlock::new().line("return this == obj;")),
            )
            .method(
                JavaMethod::new(JavaModifiers::PUBLIC, "int", "hashCode")
                    .annotate(generated)
                    .annotate(JavaAnnotation::overrides())
                    .body(JavaBlock::new().line("return Objects.hashCode(this.value);")),
            )
    }

    /// `toJson` and `fromJson` writing the enum as its bare value.
    fn json_methods(&self, ctx: &mut JavaContext) -> Vec<JavaMethod> {
        let e = self.enum_type;
        let name = &e.name;
        let value_type = e.element_type.as_nullable();
        let ty = ctx.use_json_type(&value_type);
        let writer = ctx.runtime_class(RuntimeClass::JsonWriter);
        let reader = ctx.runtime_class(RuntimeClass::JsonReader);
        ctx.import("java.io.IOException");
        let generated = ctx.generated();

        vec![
            JavaMethod::new(JavaModifiers::PUBLIC, &writer, "toJson")
                .javadoc(JavaJavadoc::new("{@inheritDoc}"))
                .annotate(generated.clone())
                .annotate(JavaAnnotation::overrides())
                .param(format!("{writer} jsonWriter"))
                .throws("IOException")
                .body(JavaBlock::new().line(format!(
                    "return {};",
                    value_type.json_write_expr("jsonWriter", None, &format!("{}()", e.to_method))
                ))),
            JavaMethod::new(JavaModifiers::PUBLIC | JavaModifiers::STATIC, name, "fromJson")
                .javadoc(
                    JavaJavadoc::new(format!("Reads an instance of {name} from the JsonReader."))
                        .param("jsonReader", "The JsonReader being read.")
                        .returns(format!(
                            "An instance of {name} if the JsonReader was pointing to an instance of it, or null if it was pointing to JSON null."
                        ))
                        .throws("IOException", format!("If an error occurs while reading {name}.")),
                )
                .annotate(generated)
                .param(format!("{reader} jsonReader"))
                .throws("IOException")
                .body(
                    JavaBlock::new()
                        .line(format!("{ty} value = {};", value_type.json_read_expr("jsonReader")))
                        .line(format!(
                            "return value == null ? null : {name}.{}(value);",
                            e.from_method
                        )),
                ),
        ]
    }
}
