//! Java naming rules.
//!
//! Every identifier the generator emits goes through these functions so that
//! code-model names (which may contain punctuation, leading digits or Java
//! keywords) always become legal and conventional Java identifiers.

/// Java keywords plus the `java.lang`/`java.time` types that generated code
/// refers to by simple name.
const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "Boolean",
    "break",
    "byte",
    "Byte",
    "case",
    "catch",
    "char",
    "Character",
    "class",
    "Class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "Double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "Float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "int",
    "Integer",
    "long",
    "Long",
    "interface",
    "instanceof",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "Short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "Void",
    "volatile",
    "while",
    "Date",
    "Datetime",
    "OffsetDateTime",
    "Duration",
    "Period",
    "Stream",
    "String",
    "Object",
    "header",
    "_",
];

/// Annotation and runtime class names a generated class must not shadow.
const RESERVED_CLASS_NAMES: &[&str] = &[
    "Host",
    "ServiceInterface",
    "ServiceMethod",
    "ServiceClient",
    "ReturnType",
    "Get",
    "Put",
    "Post",
    "Patch",
    "Delete",
    "Headers",
    "ExpectedResponses",
    "UnexpectedResponseExceptionType",
    "UnexpectedResponseExceptionTypes",
    "HostParam",
    "PathParam",
    "QueryParam",
    "HeaderParam",
    "FormParam",
    "BodyParam",
    "Fluent",
    "Immutable",
    "JsonFlatten",
    "Override",
];

/// Local variable names used inside generated client method bodies.
const RESERVED_CLIENT_METHOD_PARAMETER_NAMES: &[&str] = &["service", "client"];

/// Spelled-out name of a basic-latin punctuation or digit character.
pub fn basic_latin_name(c: char) -> Option<&'static str> {
    let name = match c {
        ' ' => "Space",
        '!' => "ExclamationMark",
        '"' => "QuotationMark",
        '#' => "NumberSign",
        '$' => "DollarSign",
        '%' => "PercentSign",
        '&' => "Ampersand",
        '\'' => "Apostrophe",
        '(' => "LeftParenthesis",
        ')' => "RightParenthesis",
        '*' => "Asterisk",
        '+' => "PlusSign",
        ',' => "Comma",
        '-' => "HyphenMinus",
        '.' => "FullStop",
        '/' => "Slash",
        '0' => "Zero",
        '1' => "One",
        '2' => "Two",
        '3' => "Three",
        '4' => "Four",
        '5' => "Five",
        '6' => "Six",
        '7' => "Seven",
        '8' => "Eight",
        '9' => "Nine",
        ':' => "Colon",
        ';' => "Semicolon",
        '<' => "LessThanSign",
        '=' => "EqualSign",
        '>' => "GreaterThanSign",
        '?' => "QuestionMark",
        '@' => "AtSign",
        '[' => "LeftSquareBracket",
        '\\' => "Backslash",
        ']' => "RightSquareBracket",
        '^' => "CircumflexAccent",
        '`' => "GraveAccent",
        '{' => "LeftCurlyBracket",
        '|' => "VerticalBar",
        '}' => "RightCurlyBracket",
        '~' => "Tilde",
        _ => return None,
    };
    Some(name)
}

fn is_case_separator(c: char) -> bool {
    matches!(c, '_' | '-' | ' ')
}

/// Upper- or lower-case the first character of a word.
///
/// Single characters and two-letter acronyms (`ID`, `IP`) change case entirely.
fn format_case(word: &str, to_lower: bool) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let len = word.chars().count();
    let acronym = len == 2 && word.chars().all(char::is_uppercase);

    if len < 2 || acronym {
        if to_lower {
            word.to_lowercase()
        } else {
            word.to_uppercase()
        }
    } else if to_lower {
        first.to_lowercase().chain(chars).collect()
    } else {
        first.to_uppercase().chain(chars).collect()
    }
}

/// Convert a name to camelCase (e.g. `"pet-store_name"` -> `"petStoreName"`).
pub fn to_camel_case(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }

    if let Some(rest) = name.strip_prefix('_') {
        return to_camel_case(rest);
    }

    let mut words = name.split(is_case_separator);
    let mut result = words
        .next()
        .map(|first| format_case(first, true))
        .unwrap_or_default();
    for word in words {
        result.push_str(&format_case(word, false));
    }
    result
}

/// Convert a name to PascalCase (e.g. `"pet store"` -> `"PetStore"`).
///
/// A leading underscore is kept.
pub fn to_pascal_case(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }

    if let Some(rest) = name.strip_prefix('_') {
        return format!("_{}", to_camel_case(rest));
    }

    name.split(is_case_separator)
        .filter(|word| !word.is_empty())
        .map(|word| format_case(word, false))
        .collect()
}

fn replace_invalid_characters(name: &str, allowed: impl Fn(char) -> bool) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || allowed(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn valid_name_with(name: &str, allowed: impl Fn(char) -> bool + Copy) -> String {
    let correct = replace_invalid_characters(name, allowed);

    let starts_badly = correct
        .chars()
        .next()
        .is_none_or(|c| basic_latin_name(c).is_some());
    if !starts_badly {
        return correct;
    }

    let spelled: String = name
        .chars()
        .map(|c| match basic_latin_name(c) {
            Some(replacement) => replacement.to_string(),
            None => c.to_string(),
        })
        .collect();
    replace_invalid_characters(&spelled, allowed)
}

/// Replace characters that cannot appear in a Java identifier with `_`,
/// keeping `_` and `-` so that case conversion can still split on them.
pub fn remove_invalid_characters(name: &str) -> String {
    valid_name_with(name, |c| c == '_' || c == '-')
}

/// Turn any string into a legal identifier body.
pub fn get_valid_name(name: &str) -> String {
    valid_name_with(name, |_| false)
}

/// Whether a name collides with a Java keyword or `java.lang` type.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Append `suffix` when `name` is a reserved word.
pub fn get_escaped_reserved_name(name: &str, suffix: &str) -> String {
    if is_reserved_word(name) {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}

fn get_escaped_reserved_name_and_classes(name: &str, suffix: &str) -> String {
    if is_reserved_word(name) || RESERVED_CLASS_NAMES.contains(&name) {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}

/// Java class name for a model or enum.
pub fn get_type_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    get_escaped_reserved_name_and_classes(&to_pascal_case(&remove_invalid_characters(name)), "Model")
}

/// Java class name for a service client.
pub fn get_client_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    get_escaped_reserved_name_and_classes(
        &to_pascal_case(&remove_invalid_characters(name)),
        "Client",
    )
}

/// Java parameter name.
pub fn get_parameter_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    get_escaped_reserved_name(&to_camel_case(&remove_invalid_characters(name)), "Parameter")
}

/// Java field name for a model property.
pub fn get_property_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    get_escaped_reserved_name(&to_camel_case(&remove_invalid_characters(name)), "Property")
}

/// Java class-name stem for an operation group.
pub fn get_method_group_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    get_escaped_reserved_name(&to_pascal_case(name), "Operation")
}

/// Java method name for an operation.
pub fn get_method_name(name: &str) -> String {
    get_escaped_reserved_name(&to_camel_case(name), "Method")
}

/// Rename parameters that would shadow locals of generated method bodies.
pub fn get_escaped_reserved_client_method_parameter_name(name: &str) -> String {
    if RESERVED_CLIENT_METHOD_PARAMETER_NAMES.contains(&name) {
        format!("{name}Param")
    } else {
        name.to_string()
    }
}

fn trim_underscores(s: &str) -> String {
    s.trim_matches('_').to_string()
}

/// UPPER_SNAKE_CASE constant name for an enum value.
pub fn get_enum_member_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }

    let all_underscores = |s: &str| s.chars().all(|c| c == '_');

    let mut source = name.to_string();
    if (source.starts_with('_') || source.ends_with('_')) && !all_underscores(&source) {
        source = trim_underscores(&source);
    }

    let mut replaced = String::with_capacity(source.len());
    let mut in_run = false;
    for c in source.chars() {
        if matches!(c, '\\' | '/' | '.' | '+' | ' ' | '-') {
            if !in_run {
                replaced.push('_');
            }
            in_run = true;
        } else {
            replaced.push(c);
            in_run = false;
        }
    }

    let valid = remove_invalid_characters(&replaced);

    let mut merged: Vec<char> = Vec::with_capacity(valid.len());
    for c in valid.chars() {
        if c == '_' && merged.last() == Some(&'_') {
            continue;
        }
        merged.push(c);
    }

    let mut i = 1;
    while i + 1 < merged.len() {
        if merged[i].is_ascii_uppercase() && merged[i - 1].is_ascii_lowercase() {
            merged.insert(i, '_');
            i += 1;
        }
        i += 1;
    }

    let mut result: String = merged.into_iter().collect();
    if result.starts_with('_') || result.ends_with('_') {
        if !all_underscores(&result) {
            result = trim_underscores(&result);
        } else if let Some(first) = name.chars().next().and_then(basic_latin_name) {
            result = format!("{first}{}", &result[1..]);
            if result.ends_with('_')
                && let Some(last) = name.chars().last().and_then(basic_latin_name)
            {
                result = format!("{}{last}", &result[..result.len() - 1]);
            }
        }
    }

    result.to_uppercase()
}

/// Make text safe to embed in a `/* */` or `/** */` comment.
pub fn escape_comment(comment: &str) -> String {
    comment.replace("*/", "*&#47;")
}

/// Escape XML special characters in javadoc text.
pub fn escape_xml_comment(comment: &str) -> String {
    let mut escaped = String::with_capacity(comment.len());
    for c in comment.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("pet_store"), "petStore");
        assert_eq!(to_camel_case("pet-store name"), "petStoreName");
        assert_eq!(to_camel_case("PetStore"), "petStore");
        assert_eq!(to_camel_case("_leading"), "leading");
        assert_eq!(to_camel_case("ID"), "id");
        assert_eq!(to_camel_case("resource_ID"), "resourceID");
        assert_eq!(to_camel_case("x"), "x");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("pet_store"), "PetStore");
        assert_eq!(to_pascal_case("pet--store"), "PetStore");
        assert_eq!(to_pascal_case("_hidden_value"), "_hiddenValue");
        assert_eq!(to_pascal_case("ip"), "Ip");
        assert_eq!(to_pascal_case("a"), "A");
    }

    #[test]
    fn test_remove_invalid_characters() {
        assert_eq!(remove_invalid_characters("odata.type"), "odata_type");
        assert_eq!(remove_invalid_characters("api-version"), "api-version");
        assert_eq!(remove_invalid_characters("$host"), "_host");
        assert_eq!(remove_invalid_characters("1st"), "Onest");
    }

    #[test]
    fn test_get_valid_name() {
        assert_eq!(get_valid_name("a-b"), "a_b");
        assert_eq!(get_valid_name("1+"), "OnePlusSign");
    }

    #[test]
    fn test_reserved_names_get_suffix() {
        assert_eq!(get_type_name("string"), "StringModel");
        assert_eq!(get_type_name("Headers"), "HeadersModel");
        assert_eq!(get_client_name("Host"), "HostClient");
        assert_eq!(get_property_name("class"), "classProperty");
        assert_eq!(get_parameter_name("default"), "defaultParameter");
        assert_eq!(get_method_name("new"), "newMethod");
        assert_eq!(get_method_group_name("Pets"), "Pets");
        assert_eq!(get_property_name("odata.type"), "odataType");
    }

    #[test]
    fn test_escaped_client_method_parameter_name() {
        assert_eq!(
            get_escaped_reserved_client_method_parameter_name("service"),
            "serviceParam"
        );
        assert_eq!(
            get_escaped_reserved_client_method_parameter_name("name"),
            "name"
        );
    }

    #[test]
    fn test_get_enum_member_name() {
        assert_eq!(get_enum_member_name("red"), "RED");
        assert_eq!(get_enum_member_name("DarkRed"), "DARK_RED");
        assert_eq!(get_enum_member_name("application/json"), "APPLICATION_JSON");
        assert_eq!(get_enum_member_name("_private_"), "PRIVATE");
        assert_eq!(get_enum_member_name("a  b"), "A_B");
        assert_eq!(get_enum_member_name("v1.0"), "V1_0");
        assert_eq!(get_enum_member_name("+"), "PLUSSIGN");
    }

    #[test]
    fn test_escape_comment() {
        assert_eq!(escape_comment("a */ b"), "a *&#47; b");
        assert_eq!(escape_comment("plain"), "plain");
    }

    #[test]
    fn test_escape_xml_comment() {
        assert_eq!(escape_xml_comment("List<Pet> & co"), "List&lt;Pet&gt; &amp; co");
    }
}
