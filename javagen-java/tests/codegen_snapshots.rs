//! Snapshot tests for Java code generation.
//!
//! These tests verify that the generated Java sources match expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use javagen_codegen::Pipeline;
use javagen_codemodel::{CodeModel, Flavor, Mode, Settings};
use javagen_java::{Generator, LanguageCodegen};

const PETSTORE: &str = r#"
info:
  title: PetStore
schemas:
  objects:
    - name: Pet
      properties:
        - name: name
          schema: string
          required: true
        - name: age
          schema: int32
operation-groups:
  - name: Pets
    operations:
      - name: get
        request:
          method: get
          path: /pets/{petId}
        parameters:
          - name: petId
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Pet
"#;

/// Generate code from a code model and return files sorted by path for deterministic snapshots.
fn generate_files(code_model_yaml: &str, settings: Settings) -> Vec<(String, String)> {
    let code_model = CodeModel::from_str(code_model_yaml).expect("Failed to parse code model");
    let ctx = Pipeline::new()
        .run(code_model, settings)
        .expect("Failed to compile code model");
    let generator = Generator::from_context(&ctx).expect("Failed to create generator");
    let files = generator.preview().expect("Failed to render files");

    let mut result: Vec<(String, String)> =
        files.into_iter().map(|f| (f.path, f.content)).collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

/// Get a specific file from the generated output.
fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

#[test]
fn test_petstore_file_list() {
    let files = generate_files(PETSTORE, Settings::for_namespace("com.petstore"));
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
    insta::assert_snapshot!("petstore_file_list", paths.join("\n"));
}

#[test]
fn test_petstore_module_info() {
    let files = generate_files(PETSTORE, Settings::for_namespace("com.petstore"));
    let module_info =
        get_file(&files, "src/main/java/module-info.java").expect("module-info.java not found");
    insta::assert_snapshot!("petstore_module_info", module_info);
}

#[test]
fn test_petstore_models_package_info() {
    let files = generate_files(PETSTORE, Settings::for_namespace("com.petstore"));
    let package_info = get_file(&files, "src/main/java/com/petstore/models/package-info.java")
        .expect("package-info.java not found");
    insta::assert_snapshot!("petstore_models_package_info", package_info);
}

#[test]
fn test_petstore_model() {
    let files = generate_files(PETSTORE, Settings::for_namespace("com.petstore"));
    let pet = get_file(&files, "src/main/java/com/petstore/models/Pet.java")
        .expect("Pet.java not found");

    assert!(pet.starts_with("// Copyright (c) Microsoft Corporation. All rights reserved.\n"));
    assert!(pet.contains("package com.petstore.models;\n"));
    assert!(pet.contains("public final class Pet implements JsonSerializable<Pet> {"));
    assert!(pet.contains("public String getName() {"));
    assert!(pet.contains("public static Pet fromJson(JsonReader jsonReader) throws IOException {"));
    assert!(pet.contains("import com.azure.json.JsonReader;\n"));
}

#[test]
fn test_petstore_client_facade() {
    let files = generate_files(PETSTORE, Settings::for_namespace("com.petstore"));
    let client = get_file(&files, "src/main/java/com/petstore/PetsClient.java")
        .expect("PetsClient.java not found");

    assert!(client.contains("@ServiceClient(builder = PetStoreClientBuilder.class)"));
    assert!(client.contains("public final class PetsClient {"));
    assert!(client.contains("private final PetsImpl serviceClient;"));
    assert!(client.contains("import com.petstore.implementation.PetsImpl;\n"));
}

#[test]
fn test_unbranded_builder() {
    let mut settings = Settings::for_namespace("com.petstore");
    settings.generator.flavor = Flavor::Unbranded;
    let files = generate_files(PETSTORE, settings);
    let builder = get_file(&files, "src/main/java/com/petstore/PetStoreClientBuilder.java")
        .expect("PetStoreClientBuilder.java not found");

    assert!(!builder.contains("com.azure"));
    assert!(!builder.contains("@Override"));
    assert!(builder.contains("public PetsClient buildPetsClient() {"));
}

#[test]
fn test_management_outputs() {
    let mut settings = Settings::for_namespace("com.azure.resourcemanager.petstore");
    settings.generator.mode = Mode::Management;
    let files = generate_files(PETSTORE, settings);
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();

    assert!(paths.contains(&"pom.xml"));
    assert!(paths.iter().any(|p| p.ends_with("Manager.java")));
    assert!(paths.iter().any(|p| p.contains("/fluent/")));

    let pom = get_file(&files, "pom.xml").expect("pom.xml not found");
    assert!(pom.contains("<artifactId>azure-resourcemanager-petstore</artifactId>"));
}

const AQUARIUM: &str = r#"
info:
  title: Aquarium
schemas:
  objects:
    - name: Fish
      discriminator: kind
      properties:
        - name: kind
          schema: string
          required: true
        - name: age
          schema: int32
        - name: color
          schema: FishColor
    - name: Shark
      parent: Fish
      discriminator: sharktype
      discriminator-value: shark
      properties:
        - name: sharktype
          schema: string
          required: true
    - name: Sawshark
      parent: Shark
      discriminator-value: saw
    - name: Salmon
      parent: Fish
      discriminator-value: salmon
      properties:
        - name: water
          schema: Water
    - name: FishPatch
      properties:
        - name: nickname
          schema: string
        - name: age
          schema: int32
    - name: FishList
      properties:
        - name: value
          schema: array<Fish>
          required: true
        - name: nextLink
          schema: string
    - name: Tank
      properties:
        - name: name
          schema: string
          required: true
      additional-properties: any
    - name: Photo
      properties:
        - name: caption
          schema: string
          required: true
        - name: image
          schema: binary
          required: true
    - name: Status
      properties:
        - name: state
          schema: string
  choices:
    - name: FishColor
      choices:
        - name: red
          value: red
        - name: blue
          value: blue
  sealed-choices:
    - name: Water
      choices:
        - name: fresh
          value: fresh
        - name: salt
          value: salt
operation-groups:
  - name: Fishes
    operations:
      - name: get
        request:
          method: get
          path: /fishes/{name}
        parameters:
          - name: name
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Fish
      - name: update
        request:
          method: patch
          path: /fishes/{name}
          media-types: [application/merge-patch+json]
        parameters:
          - name: name
            location: path
            schema: string
            required: true
          - name: body
            location: body
            schema: FishPatch
            required: true
        responses:
          - status-codes: [200]
            schema: FishPatch
      - name: list
        request:
          method: get
          path: /fishes
        responses:
          - status-codes: [200]
            schema: FishList
        paging:
          next-link-name: nextLink
      - name: clean
        request:
          method: post
          path: /fishes/{name}/clean
        parameters:
          - name: name
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [202]
        long-running:
          poll-result-type: Status
      - name: uploadPhoto
        request:
          method: post
          path: /fishes/{name}/photo
          media-types: [multipart/form-data]
        parameters:
          - name: name
            location: path
            schema: string
            required: true
          - name: body
            location: body
            schema: Photo
            required: true
        responses:
          - status-codes: [204]
  - name: Tanks
    operations:
      - name: get
        request:
          method: get
          path: /tanks/{name}
        parameters:
          - name: name
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Tank
"#;

const AQUARIUM_MODELS: &str = "src/main/java/com/aquarium/models";

fn aquarium(flavor: Flavor) -> Vec<(String, String)> {
    let mut settings = Settings::for_namespace("com.aquarium");
    settings.generator.flavor = flavor;
    generate_files(AQUARIUM, settings)
}

fn aquarium_file<'a>(files: &'a [(String, String)], path: &str) -> &'a str {
    let path = format!("src/main/java/com/aquarium/{path}");
    get_file(files, &path).unwrap_or_else(|| panic!("{path} not found"))
}

#[test]
fn test_aquarium_file_list() {
    let files = aquarium(Flavor::Azure);
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
    insta::assert_snapshot!("aquarium_file_list", paths.join("\n"));
}

#[test]
fn test_polymorphic_hierarchy() {
    let files = aquarium(Flavor::Azure);

    let fish = aquarium_file(&files, "models/Fish.java");
    assert!(fish.contains("public class Fish implements JsonSerializable<Fish> {"));
    assert!(fish.contains("try (JsonReader readerToUse = reader.bufferObject()) {"));
    assert!(fish.contains("if (\"shark\".equals(discriminatorValue)) {"));
    assert!(fish.contains("return Shark.fromJson(readerToUse.reset());"));
    assert!(fish.contains("if (\"salmon\".equals(discriminatorValue)) {"));
    assert!(fish.contains("static Fish fromJsonKnownDiscriminator(JsonReader jsonReader) throws IOException {"));

    // Shark declares its own discriminator and dispatches on it.
    let shark = aquarium_file(&files, "models/Shark.java");
    assert!(shark.contains("public class Shark extends Fish {"));
    assert!(shark.contains("if (\"saw\".equals(discriminatorValue)) {"));
    assert!(shark.contains("return Sawshark.fromJson(readerToUse.reset());"));

    let sawshark = aquarium_file(&files, "models/Sawshark.java");
    assert!(sawshark.contains("public final class Sawshark extends Shark {"));
    assert!(sawshark.contains("\"saw\""));

    let salmon = aquarium_file(&files, "models/Salmon.java");
    assert!(salmon.contains("public final class Salmon extends Fish {"));
    assert!(salmon.contains("\"salmon\""));
    assert!(salmon.contains("public Water getWater() {"));
}

#[test]
fn test_expandable_and_sealed_enums() {
    let files = aquarium(Flavor::Azure);

    let color = aquarium_file(&files, "models/FishColor.java");
    assert!(color.contains("public final class FishColor extends ExpandableStringEnum<FishColor> {"));
    assert!(color.contains("    public static final FishColor RED = fromString(\"red\");"));
    assert!(color.contains("import com.azure.core.util.ExpandableStringEnum;"));

    let water = aquarium_file(&files, "models/Water.java");
    assert!(water.contains("public enum Water {"));
    assert!(water.contains("    FRESH(\"fresh\"),\n"));
    assert!(water.contains("    SALT(\"salt\");\n"));
    assert!(water.contains("    public static Water fromString(String value) {"));

    let mut settings = Settings::for_namespace("com.aquarium");
    settings.generator.flavor = Flavor::Unbranded;
    let files = generate_files(AQUARIUM, settings);
    let color = aquarium_file(&files, "models/FishColor.java");
    assert!(color.contains("implements ExpandableEnum<String>, JsonSerializable<FishColor> {"));
    assert!(color.contains("public static final FishColor RED = fromValue(\"red\");"));
}

#[test]
fn test_merge_patch_end_to_end() {
    let files = aquarium(Flavor::Azure);

    let patch = aquarium_file(&files, "models/FishPatch.java");
    assert!(patch.contains("private final Set<String> updatedProperties = new HashSet<>();"));
    assert!(patch.contains("JsonMergePatchHelper.setFishPatchAccessor(new JsonMergePatchHelper.FishPatchAccessor() {"));
    assert!(patch.contains("import com.aquarium.implementation.JsonMergePatchHelper;"));

    let helper = aquarium_file(&files, "implementation/JsonMergePatchHelper.java");
    assert!(helper.contains("    private static FishPatchAccessor fishPatchAccessor;"));
    assert!(helper.contains("        FishPatch prepareModelForJsonMergePatch(FishPatch model, boolean jsonMergePatchEnabled);"));

    let fishes = aquarium_file(&files, "implementation/FishesImpl.java");
    assert!(fishes.contains("JsonMergePatchHelper.getFishPatchAccessor().prepareModelForJsonMergePatch(body, true);"));
    assert!(fishes.contains("        } finally {\n            JsonMergePatchHelper.getFishPatchAccessor().prepareModelForJsonMergePatch(body, false);\n        }"));
    assert!(fishes.contains("@BodyParam(\"application/merge-patch+json\")"));
}

#[test]
fn test_paging_and_long_running() {
    let files = aquarium(Flavor::Azure);

    let fishes = aquarium_file(&files, "implementation/FishesImpl.java");
    assert!(fishes.contains("PagedResponse<Fish> listSinglePage("));
    assert!(fishes.contains("PagedIterable<Fish> list("));
    assert!(fishes.contains("PagedResponse<Fish> listNextSinglePage("));
    assert!(fishes.contains(" beginClean("));
    assert!(fishes.contains("SyncPoller<"));

    let client = aquarium_file(&files, "FishesClient.java");
    assert!(client.contains("PagedIterable<Fish> list("));
    assert!(client.contains(" beginClean("));

    // Without a poller the operation becomes a plain method.
    let mut settings = Settings::for_namespace("com.aquarium");
    settings.generator.flavor = Flavor::Unbranded;
    let files = generate_files(AQUARIUM, settings);
    let fishes = aquarium_file(&files, "implementation/FishesImpl.java");
    assert!(!fishes.contains("beginClean"));
    assert!(!fishes.contains("SyncPoller"));
}

#[test]
fn test_additional_properties_model() {
    let files = aquarium(Flavor::Azure);
    let tank = aquarium_file(&files, "models/Tank.java");

    assert!(tank.contains("    private Map<String, "));
    assert!(tank.contains("getAdditionalProperties() {"));
    assert!(tank.contains("for (Map.Entry<String, "));
    assert!(tank.contains("jsonWriter.writeFieldName(additionalProperty.getKey());"));
    assert!(tank.contains("additionalProperties.put(fieldName, "));
    assert!(tank.contains("deserializedTank.additionalProperties = additionalProperties;"));
    assert!(tank.contains("import java.util.LinkedHashMap;"));
}

#[test]
fn test_multipart_upload() {
    let files = aquarium(Flavor::Azure);

    let fishes = aquarium_file(&files, "implementation/FishesImpl.java");
    assert!(fishes.contains("    // @Multipart not supported by RestProxy\n"));
    assert!(fishes.contains("@BodyParam(\"multipart/form-data\") BinaryData body"));
    assert!(fishes.contains("BinaryData bodyConverted = new MultipartFormDataHelper(requestOptions)"));
    assert!(fishes.contains(".serializeTextField(\"caption\", body.getCaption())"));
    assert!(fishes.contains(".serializeFileField(\"image\", body.getImage(), null, \"image\")"));

    let helper = aquarium_file(&files, "implementation/MultipartFormDataHelper.java");
    assert!(helper.contains("public final class MultipartFormDataHelper {"));

    let mut settings = Settings::for_namespace("com.aquarium");
    settings.generator.flavor = Flavor::Unbranded;
    let files = generate_files(AQUARIUM, settings);
    assert!(files.iter().all(|(p, _)| !p.ends_with("MultipartFormDataHelper.java")));
    let fishes = aquarium_file(&files, "implementation/FishesImpl.java");
    assert!(fishes.contains("// @Multipart not supported by RestProxy"));
    assert!(!fishes.contains("serializeTextField"));
}

#[test]
fn test_unbranded_models() {
    let mut settings = Settings::for_namespace("com.aquarium");
    settings.generator.flavor = Flavor::Unbranded;
    let files = generate_files(AQUARIUM, settings);

    for (path, content) in files.iter().filter(|(p, _)| p.starts_with(AQUARIUM_MODELS)) {
        assert!(!content.contains("com.azure.core"), "{path} refers to azure-core");
    }
    let fish = aquarium_file(&files, "models/Fish.java");
    assert!(fish.contains("import io.clientcore.core.serialization.json.JsonReader;"));
    assert!(fish.contains("@Metadata(properties = { MetadataProperties.IMMUTABLE })"));
}

const WIDGETS: &str = r#"
info:
  title: Widgets
schemas:
  objects:
    - name: TrackedResource
      properties:
        - name: id
          schema: string
          read-only: true
        - name: name
          schema: string
          read-only: true
        - name: type
          schema: string
          read-only: true
        - name: location
          schema: string
        - name: tags
          schema: dict<string>
    - name: Widget
      parent: TrackedResource
      properties:
        - name: color
          schema: string
    - name: WidgetList
      properties:
        - name: value
          schema: array<Widget>
        - name: nextLink
          schema: string
operation-groups:
  - name: Widgets
    operations:
      - name: get
        request:
          method: get
          path: /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Contoso.Widgets/widgets/{widgetName}
        parameters:
          - name: resourceGroupName
            location: path
            schema: string
            required: true
          - name: widgetName
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: Widget
      - name: listInGroup
        request:
          method: get
          path: /subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Contoso.Widgets/widgets
        parameters:
          - name: resourceGroupName
            location: path
            schema: string
            required: true
        responses:
          - status-codes: [200]
            schema: WidgetList
        paging:
          next-link-name: nextLink
clients:
  - name: WidgetsClient
    global-parameters:
      - name: $host
        location: uri
        schema: string
        implementation: client
      - name: subscriptionId
        location: path
        schema: uuid
        required: true
        implementation: client
"#;

#[test]
fn test_management_resource_model() {
    let mut settings = Settings::for_namespace("com.azure.resourcemanager.widgets");
    settings.generator.mode = Mode::Management;
    let files = generate_files(WIDGETS, settings);
    let root = "src/main/java/com/azure/resourcemanager/widgets";
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();

    let inner = get_file(&files, &format!("{root}/fluent/models/WidgetInner.java"))
        .unwrap_or_else(|| panic!("WidgetInner.java not found in {paths:?}"));
    assert!(inner.contains("public final class WidgetInner extends Resource {"));
    assert!(inner.contains("import com.azure.core.management.Resource;"));
    assert!(inner.contains("public String color() {"));
    assert!(!inner.contains("private String location;"));

    assert!(paths.contains(&format!("{root}/implementation/models/WidgetList.java").as_str()));
    assert!(paths.contains(&format!("{root}/fluent/WidgetsClient.java").as_str()));
    assert!(paths.iter().all(|p| !p.ends_with("/TrackedResource.java")));
    assert!(paths.iter().any(|p| p.ends_with("Manager.java")));
}
