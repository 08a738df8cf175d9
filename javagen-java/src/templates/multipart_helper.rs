//! The helper writing `multipart/form-data` request bodies.

use javagen_codegen::RuntimeClass;
use javagen_codemodel::Settings;
use javagen_ir::{ClientModels, MULTIPART_FORM_DATA_HELPER, ServiceClient};

use crate::ast::{
    JavaBlock, JavaClass, JavaContext, JavaField, JavaFile, JavaJavadoc, JavaMethod, JavaModifiers,
};

/// Renders `MultipartFormDataHelper` in the implementation package.
///
/// Client methods build a multipart body with one `serialize*Field` call per
/// part, then `end()` to close the body and set the request headers.
pub struct MultipartFormDataHelperTemplate<'a> {
    settings: &'a Settings,
}

fn client_sends_multipart(client: &ServiceClient) -> bool {
    client
        .proxy
        .iter()
        .chain(client.method_groups.iter().map(|g| &g.proxy))
        .flat_map(|proxy| &proxy.methods)
        .flat_map(|method| &method.parameters)
        .any(|p| p.multipart.is_some())
}

/// Whether any proxy method writes its body through the helper.
pub fn needs_multipart_helper(models: &ClientModels) -> bool {
    models.service_clients.iter().any(client_sends_multipart)
}

/// `{prefix}"Content-Disposition: form-data; name=\"" + escapeName(fieldName) + "\""`.
fn disposition(field: &str) -> String {
    format!(r#"partSeparator + CRLF + "Content-Disposition: form-data; name=\"" + escapeName({field}) + "\"""#)
}

impl<'a> MultipartFormDataHelperTemplate<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn render(&self) -> JavaFile {
        let mut ctx = JavaContext::new(self.settings, self.settings.implementation_package());
        let binary = ctx.runtime_class(RuntimeClass::BinaryData);
        let options = ctx.runtime_class(RuntimeClass::RequestOptions);
        let header = ctx.runtime_class(RuntimeClass::HttpHeaderName);
        let core_utils = ctx.runtime_class(RuntimeClass::CoreUtils);
        ctx.import_all([
            "java.io.ByteArrayInputStream",
            "java.io.InputStream",
            "java.io.SequenceInputStream",
            "java.nio.charset.StandardCharsets",
            "java.util.UUID",
        ]);
        let helper = MULTIPART_FORM_DATA_HELPER;

        let mut class = JavaClass::class(JavaModifiers::PUBLIC | JavaModifiers::FINAL, helper)
            .javadoc(JavaJavadoc::new("Helper class for building a multipart/form-data request body."));

        let constant = JavaModifiers::PRIVATE | JavaModifiers::STATIC | JavaModifiers::FINAL;
        let immutable = JavaModifiers::PRIVATE | JavaModifiers::FINAL;
        class.add_field(JavaField::new(constant, "String", "CRLF").init(r#""\r\n""#));
        class.add_field(
            JavaField::new(constant, "String", "APPLICATION_OCTET_STREAM").init(r#""application/octet-stream""#),
        );
        class.add_field(JavaField::new(immutable, "String", "partSeparator"));
        class.add_field(JavaField::new(immutable, "String", "endMarker"));
        class.add_field(JavaField::new(immutable, "String", "contentType"));
        class.add_field(JavaField::new(immutable, &options, "requestOptions"));
        class.add_field(
            JavaField::new(JavaModifiers::PRIVATE, "InputStream", "requestDataStream")
                .init("new ByteArrayInputStream(new byte[0])"),
        );
        class.add_field(JavaField::new(JavaModifiers::PRIVATE, "long", "requestLength").init("0"));
        class.add_field(JavaField::new(JavaModifiers::PRIVATE, &binary, "requestBody"));

        class.add_method(
            JavaMethod::constructor(JavaModifiers::PUBLIC, helper)
                .javadoc(
                    JavaJavadoc::new(format!("Creates a new instance of {helper}."))
                        .param("requestOptions", "the request options receiving the content headers."),
                )
                .param(format!("{options} requestOptions"))
                .body(JavaBlock::new().line("this(requestOptions, UUID.randomUUID().toString().substring(0, 16));")),
        );
        class.add_method(
            JavaMethod::constructor(JavaModifiers::PUBLIC, helper)
                .javadoc(
                    JavaJavadoc::new(format!("Creates a new instance of {helper}."))
                        .param("requestOptions", "the request options receiving the content headers.")
                        .param("boundary", "the part boundary."),
                )
                .param(format!("{options} requestOptions"))
                .param("String boundary")
                .body(JavaBlock::new().lines([
                    "this.requestOptions = requestOptions;".to_string(),
                    r#"this.partSeparator = "--" + boundary;"#.to_string(),
                    r#"this.endMarker = this.partSeparator + "--";"#.to_string(),
                    r#"this.contentType = "multipart/form-data; boundary=" + boundary;"#.to_string(),
                ])),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC, &binary, "getRequestBody")
                .javadoc(
                    JavaJavadoc::new("Gets the multipart/form-data request body.")
                        .returns("the request body, set by {@link #end()}."),
                )
                .body(JavaBlock::new().line("return requestBody;")),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC, helper, "serializeTextField")
                .javadoc(
                    JavaJavadoc::new("Serializes a text field. Null values are skipped.")
                        .param("fieldName", "the field name.")
                        .param("value", "the value of the text field.")
                        .returns(format!("the {helper} instance.")),
                )
                .param("String fieldName")
                .param("String value")
                .body(
                    JavaBlock::new()
                        .block(
                            "if (value != null) {",
                            JavaBlock::new()
                                .line(format!(
                                    "String serialized = {} + CRLF + CRLF + value + CRLF;",
                                    disposition("fieldName")
                                ))
                                .line("appendBytes(serialized.getBytes(StandardCharsets.UTF_8));"),
                        )
                        .line("return this;"),
                ),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC, helper, "serializeJsonField")
                .javadoc(
                    JavaJavadoc::new("Serializes a field as JSON. Null values are skipped.")
                        .param("fieldName", "the field name.")
                        .param("jsonObject", "the object serialized as JSON.")
                        .returns(format!("the {helper} instance.")),
                )
                .param("String fieldName")
                .param("Object jsonObject")
                .body(
                    JavaBlock::new()
                        .block(
                            "if (jsonObject != null) {",
                            JavaBlock::new()
                                .line(format!(
                                    r#"String serialized = {} + CRLF + "Content-Type: application/json" + CRLF + CRLF + {binary}.fromObject(jsonObject) + CRLF;"#,
                                    disposition("fieldName")
                                ))
                                .line("appendBytes(serialized.getBytes(StandardCharsets.UTF_8));"),
                        )
                        .line("return this;"),
                ),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC, helper, "serializeFileField")
                .javadoc(
                    JavaJavadoc::new("Serializes a file field. Null files are skipped.")
                        .param("fieldName", "the field name.")
                        .param("file", "the file content.")
                        .param("contentType", "the content type of the file, application/octet-stream when empty.")
                        .param("filename", "the file name.")
                        .returns(format!("the {helper} instance.")),
                )
                .param("String fieldName")
                .param(format!("{binary} file"))
                .param("String contentType")
                .param("String filename")
                .body(
                    JavaBlock::new()
                        .block(
                            "if (file != null) {",
                            JavaBlock::new()
                                .block(
                                    format!("if ({core_utils}.isNullOrEmpty(contentType)) {{"),
                                    JavaBlock::new().line("contentType = APPLICATION_OCTET_STREAM;"),
                                )
                                .line("writeFileField(fieldName, file, contentType, filename);"),
                        )
                        .line("return this;"),
                ),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PUBLIC, helper, "end")
                .javadoc(
                    JavaJavadoc::new("Ends the serialization of the multipart/form-data request.")
                        .returns(format!("the {helper} instance.")),
                )
                .body(JavaBlock::new().lines([
                    "appendBytes(endMarker.getBytes(StandardCharsets.UTF_8));".to_string(),
                    format!("requestBody = {binary}.fromStream(requestDataStream, requestLength);"),
                    format!("requestOptions.setHeader({header}.CONTENT_TYPE, contentType)"),
                    format!("    .setHeader({header}.CONTENT_LENGTH, String.valueOf(requestLength));"),
                    "return this;".to_string(),
                ])),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PRIVATE, "void", "writeFileField")
                .param("String fieldName")
                .param(format!("{binary} file"))
                .param("String contentType")
                .param("String filename")
                .body(
                    JavaBlock::new()
                        .line(r#"String contentDispositionFilename = "";"#)
                        .block(
                            format!("if (!{core_utils}.isNullOrEmpty(filename)) {{"),
                            JavaBlock::new().line(
                                r#"contentDispositionFilename = "; filename=\"" + escapeName(filename) + "\"";"#,
                            ),
                        )
                        .line(format!(
                            r#"String preamble = {} + contentDispositionFilename + CRLF + "Content-Type: " + contentType + CRLF + CRLF;"#,
                            disposition("fieldName")
                        ))
                        .line("appendBytes(preamble.getBytes(StandardCharsets.UTF_8));")
                        .blank()
                        .line("Long length = file.getLength();")
                        .branches(vec![
                            (
                                "if (length == null) {",
                                JavaBlock::new().line("appendBytes(file.toBytes());"),
                            ),
                            (
                                "else {",
                                JavaBlock::new().lines([
                                    "requestLength += length;",
                                    "requestDataStream = new SequenceInputStream(requestDataStream, file.toStream());",
                                ]),
                            ),
                        ])
                        .line("appendBytes(CRLF.getBytes(StandardCharsets.UTF_8));"),
                ),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PRIVATE, "void", "appendBytes")
                .param("byte[] bytes")
                .body(JavaBlock::new().lines([
                    "requestLength += bytes.length;",
                    "requestDataStream = new SequenceInputStream(requestDataStream, new ByteArrayInputStream(bytes));",
                ])),
        );

        class.add_method(
            JavaMethod::new(JavaModifiers::PRIVATE | JavaModifiers::STATIC, "String", "escapeName")
                .param("String name")
                .body(JavaBlock::new().line(
                    r#"return name.replace("\n", "%0A").replace("\r", "%0D").replace("\"", "%22");"#,
                )),
        );

        ctx.into_file(helper).add(class)
    }
}
