#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod fixtures {
    use serde_json::Value;

    /// Petstore-style document exercising refs, multiple responses and a 204.
    pub const PETSTORE_YAML: &str = r##"openapi: 3.0.3
info:
  title: Petstore
  version: "1.0.0"
servers:
  - url: https://petstore.example.com/v1/
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        "200":
          description: A page of pets
          content:
            application/json:
              schema:
                type: array
                minLength: 2
                maxLength: 4
                items:
                  $ref: '#/components/schemas/Pet'
        default:
          description: unexpected error
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Error'
    post:
      operationId: createPets
      responses:
        "201":
          description: Created
        "422":
          description: Invalid pet
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Error'
  /pets/{petId}:
    summary: A single pet
    get:
      operationId: showPetById
      responses:
        "200":
          description: The pet
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pet'
        "404":
          description: Not found
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Error'
    delete:
      operationId: deletePet
      responses:
        "204":
          description: Deleted
  /admin/stats:
    get:
      responses:
        "200":
          description: Stats without an operation id
          content:
            application/json:
              schema:
                type: object
                additionalProperties:
                  type: integer
                  minimum: 0
                  maximum: 100
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: string
          format: uuid
        name:
          type: string
        photoUrl:
          type: string
          format: uri
        ownerEmail:
          type: string
        status:
          type: string
          enum: [available, pending, sold]
        age:
          type: integer
          minimum: 0
          maximum: 30
        createdAt:
          type: string
        tags:
          type: array
          items:
            type: string
    Error:
      type: object
      properties:
        code:
          type: integer
          example: 404
        message:
          type: string
"##;

    pub fn petstore() -> Value {
        serde_yaml::from_str(PETSTORE_YAML).unwrap()
    }
}
