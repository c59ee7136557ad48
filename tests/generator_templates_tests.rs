#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixtures::petstore;
use mockgen::generator::{generate_mock_module, import_lines, render_mock_module, write_mock_file};
use mockgen::{load_spec_from_value, GenerationOptions};
use std::fs;

#[test]
fn test_module_layout_javascript() {
    let options = GenerationOptions::default();
    let spec = load_spec_from_value(petstore(), &options).unwrap();
    let module = generate_mock_module(&spec, &options).unwrap();

    let order = [
        "/* eslint-disable */",
        "import { rest } from 'mswx';",
        "import { faker } from '@faker-js/faker';",
        "import { setupWorker } from 'msw';",
        "faker.seed(1);",
        "const MAX_ARRAY_LENGTH = 20;",
        "export function createMockContext() {",
        "rest.config.API_PREFIX = 'https://petstore.example.com/v1';",
        "export function createHandlers(context) {",
        "rest.get(`/pets`",
        "rest.post(`/pets`",
        "rest.get(`/pets/:petId`",
        "rest.delete(`/pets/:petId`",
        "rest.get(`/admin/stats`",
        "export const handlers = createHandlers(createMockContext());",
        "export const worker = setupWorker(...handlers);",
        "export function getListPets200Response()",
    ];
    let mut cursor = 0;
    for needle in order {
        let found = module[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` missing or out of order"));
        cursor += found + needle.len();
    }
    assert!(!module.contains("generateMock"));
    assert!(!module.contains(": MockContext"));
}

#[test]
fn test_module_typescript_node_registry() {
    let options = GenerationOptions {
        output: "./src/mocks/handlers.ts".into(),
        schema_registry_module: Some("./src/api.ts".into()),
        node: true,
        max_array_length: 7,
        ..Default::default()
    };
    let spec = load_spec_from_value(petstore(), &options).unwrap();
    let module = generate_mock_module(&spec, &options).unwrap();

    assert!(module.contains("import { generateMock } from '@anatine/zod-mock';"));
    assert!(module.contains("import { schemas } from '../../src/api';"));
    assert!(module.contains("import { setupServer } from 'msw/node';"));
    assert!(module.contains("const MAX_ARRAY_LENGTH = 7;"));
    assert!(module.contains("export function createMockContext(): MockContext {"));
    assert!(module.contains("const counters: { [pathname: string]: number } = {};"));
    assert!(module.contains("next(pathname: string) {"));
    assert!(module.contains("export const server = setupServer(...handlers);"));
    assert!(module.contains("generateMock(schemas.Pet)"));
    assert!(!module.contains("setupWorker"));
}

#[test]
fn test_flat_output_registry_import() {
    let options = GenerationOptions {
        output: "mock.ts".into(),
        schema_registry_module: Some("./src/api.ts".into()),
        ..Default::default()
    };
    assert!(import_lines(&options).contains(&"import { schemas } from './src/api';".to_string()));
}

#[test]
fn test_base_url_is_escaped() {
    let module = render_mock_module("T", &[], "/it's", &GenerationOptions::default()).unwrap();
    assert!(module.contains(r"rest.config.API_PREFIX = '/it\'s';"));
}

#[test]
fn test_write_mock_file_respects_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("src").join("mocks").join("handlers.js");

    assert!(write_mock_file(&path, "first", false).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "first");

    assert!(!write_mock_file(&path, "second", false).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "first");

    assert!(write_mock_file(&path, "third", true).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "third");
}
