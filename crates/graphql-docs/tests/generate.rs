//! End-to-end runs of the documentation pipeline over SDL fixtures

use apollo_compiler::Schema;
use apollo_compiler::validation::Valid;
use graphql_docs::transformer::{ExpandedObject, Section};
use graphql_docs::{
    AnnotationKind, DocModel, ExampleBundle, ExpandedType, OperationType, TransformConfig,
    WarningCode, generate,
};
use serde_json::json;

const LIBRARY: &str = include_str!("fixtures/library.graphql");

fn library() -> Valid<Schema> {
    Schema::parse_and_validate(LIBRARY, "library.graphql").expect("fixture schema is valid")
}

fn bundles() -> Vec<ExampleBundle> {
    serde_json::from_value(json!([
        {
            "operationName": "ping",
            "operationType": "mutation",
            "examples": [{
                "name": "Ping",
                "query": "mutation { ping }",
                "response": { "type": "success", "httpStatus": 200, "body": { "data": { "ping": true } } }
            }]
        },
        {
            "operation": "member",
            "examples": [{
                "name": "Missing member",
                "query": "query ($id: ID!) { member(id: $id) { name } }",
                "variables": { "id": "404" },
                "response": { "type": "failure", "body": { "data": { "member": null } } }
            }]
        },
        {
            "operationName": "checkout",
            "examples": []
        },
        {
            "operationName": "renew",
            "operationType": "query",
            "examples": []
        }
    ]))
    .expect("valid bundles")
}

fn excluding_internal() -> TransformConfig {
    TransformConfig {
        exclude_doc_groups: vec!["Internal".to_string()],
        ..Default::default()
    }
}

fn section<'a>(model: &'a DocModel, name: &str) -> &'a Section {
    model
        .sections
        .iter()
        .find(|section| section.name == name)
        .expect("section exists")
}

fn catalog_object<'a>(model: &'a DocModel, name: &str) -> &'a ExpandedObject {
    model
        .type_named(name)
        .and_then(ExpandedType::as_object)
        .expect("catalog object exists")
}

#[test]
fn self_referencing_user_end_to_end() {
    let schema = Schema::parse_and_validate(
        r#"
        type Query { getUser(id: ID!): User }
        type User { id: ID! bestFriend: User }
        "#,
        "user.graphql",
    )
    .expect("valid schema");

    let generated = generate(&schema, &[], &TransformConfig::default());

    assert!(generated.warnings.is_empty());
    let user = catalog_object(&generated.doc_model, "User");
    assert_eq!(
        user.field("bestFriend").map(|field| &field.ty),
        Some(&ExpandedType::circular_ref("User"))
    );

    let operations: Vec<_> = generated.doc_model.operations().collect();
    assert_eq!(operations.len(), 1);
    insta::assert_json_snapshot!(operations[0], @r##"
    {
      "name": "getUser",
      "operationType": "query",
      "arguments": [
        {
          "name": "id",
          "type": {
            "kind": "TYPE_REF",
            "name": "ID",
            "link": "#id"
          },
          "typeRef": "ID!",
          "isRequired": true
        }
      ],
      "returnType": {
        "kind": "TYPE_REF",
        "name": "User",
        "link": "#user"
      },
      "returnTypeRef": "User",
      "annotations": {},
      "referencedTypes": [
        "User",
        "ID"
      ],
      "isDeprecated": false,
      "examples": []
    }
    "##);
}

#[test]
fn ignored_interfaces_never_reach_the_output() {
    let schema = Schema::parse_and_validate(
        r#"
        directive @docIgnore on INTERFACE
        interface Internal @docIgnore { id: ID! }
        interface Node { id: ID! }
        type User implements Internal & Node { id: ID! }
        type Query { user: User }
        "#,
        "user.graphql",
    )
    .expect("valid schema");

    let generated = generate(&schema, &[], &TransformConfig::default());

    let names: Vec<_> = generated
        .doc_model
        .types
        .iter()
        .filter_map(ExpandedType::name)
        .collect();
    assert_eq!(names, ["ID", "Node", "User"]);
    assert_eq!(
        catalog_object(&generated.doc_model, "User").interfaces,
        Some(vec!["Node".to_string()])
    );
}

#[test]
fn sections_follow_groups_order_and_exclusions() {
    let generated = generate(&library(), &bundles(), &excluding_internal());
    let model = &generated.doc_model;

    let sections: Vec<_> = model
        .sections
        .iter()
        .map(|section| section.name.as_str())
        .collect();
    assert_eq!(sections, ["Members", "Catalog", "Uncategorized"]);
    assert_eq!(model.sections[0].order, Some(1.0));

    let members: Vec<_> = section(model, "Members")
        .subsections
        .iter()
        .map(|subsection| {
            (
                subsection.name.as_str(),
                subsection
                    .operations
                    .iter()
                    .map(|operation| operation.name.as_str())
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    assert_eq!(
        members,
        [
            ("", vec!["member"]),
            ("Admin", vec!["createMember"]),
            ("Listing", vec!["members"]),
        ]
    );

    let catalog: Vec<_> = section(model, "Catalog").subsections[0]
        .operations
        .iter()
        .map(|operation| operation.name.as_str())
        .collect();
    assert_eq!(catalog, ["book", "search"]);

    let uncategorized: Vec<_> = section(model, "Uncategorized").subsections[0]
        .operations
        .iter()
        .map(|operation| (operation.operation_type, operation.name.as_str()))
        .collect();
    assert_eq!(
        uncategorized,
        [
            (OperationType::Query, "ping"),
            (OperationType::Query, "broken"),
            (OperationType::Mutation, "ping"),
            (OperationType::Mutation, "renew"),
        ]
    );

    assert!(model.operations().all(|operation| operation.name != "secret"));
    assert!(model.operations().all(|operation| operation.name != "stats"));
}

#[test]
fn examples_attach_to_the_matching_operation() {
    let generated = generate(&library(), &bundles(), &excluding_internal());

    let examples: Vec<_> = generated
        .doc_model
        .operations()
        .filter(|operation| !operation.examples.is_empty())
        .map(|operation| {
            (
                operation.operation_type,
                operation.name.as_str(),
                operation.examples[0].name.as_str(),
            )
        })
        .collect();
    assert_eq!(
        examples,
        [
            (OperationType::Query, "member", "Missing member"),
            (OperationType::Mutation, "ping", "Ping"),
        ]
    );
}

#[test]
fn warnings_cover_directives_and_examples() {
    let generated = generate(&library(), &bundles(), &excluding_internal());

    let warnings: Vec<_> = generated
        .warnings
        .iter()
        .map(|warning| (warning.code, warning.coordinate.as_str()))
        .collect();
    assert_eq!(
        warnings,
        [
            (WarningCode::InvalidDirectiveUsage, "Query.broken"),
            (WarningCode::UnknownOperation, "checkout"),
            (WarningCode::OperationTypeMismatch, "query.renew"),
        ]
    );
    assert_eq!(
        generated.warnings[0].annotation_name,
        Some(AnnotationKind::DocGroup)
    );
}

#[test]
fn required_examples_report_documented_operations_without_any() {
    let config = TransformConfig {
        require_examples: true,
        ..excluding_internal()
    };
    let generated = generate(&library(), &bundles(), &config);

    let missing: Vec<_> = generated
        .warnings
        .iter()
        .filter(|warning| warning.code == WarningCode::MissingOperationExample)
        .map(|warning| warning.coordinate.as_str())
        .collect();
    assert_eq!(
        missing,
        [
            "query.members",
            "query.search",
            "query.book",
            "query.ping",
            "query.broken",
            "mutation.createMember",
            "mutation.renew",
        ]
    );
}

#[test]
fn operation_signatures_drop_ignored_arguments() {
    let generated = generate(&library(), &[], &TransformConfig::default());

    let members = generated
        .doc_model
        .operations()
        .find(|operation| operation.name == "members")
        .expect("members operation");

    let arguments: Vec<_> = members
        .arguments
        .iter()
        .map(|argument| (argument.name.as_str(), argument.default_value.clone()))
        .collect();
    assert_eq!(arguments, [("first", Some(json!(10)))]);
    assert_eq!(
        members.return_type,
        ExpandedType::list(ExpandedType::type_ref("Member"))
    );
}

#[test]
fn deprecated_operations_keep_their_reason() {
    let generated = generate(&library(), &[], &TransformConfig::default());

    let renew = generated
        .doc_model
        .operations()
        .find(|operation| operation.name == "renew")
        .expect("renew operation");

    assert!(renew.is_deprecated);
    assert_eq!(
        renew.deprecation_reason.as_deref(),
        Some("Loans renew automatically")
    );
}

#[test]
fn catalog_is_sorted_and_skips_ignored_types() {
    let generated = generate(&library(), &[], &TransformConfig::default());

    let names: Vec<_> = generated
        .doc_model
        .types
        .iter()
        .filter_map(ExpandedType::name)
        .collect();
    assert_eq!(
        names,
        [
            "Author",
            "Book",
            "Boolean",
            "DateTime",
            "ID",
            "Int",
            "Loan",
            "Member",
            "MemberInput",
            "Role",
            "SearchResult",
            "String",
        ]
    );
}

#[test]
fn catalog_entries_inline_nested_types() {
    let generated = generate(&library(), &[], &TransformConfig::default());
    let member = catalog_object(&generated.doc_model, "Member");

    let fields: Vec<_> = member.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(fields, ["id", "name", "loans", "role", "audit"]);
    assert_eq!(
        member.field("audit").map(|field| &field.ty),
        Some(&ExpandedType::scalar("AuditLog", None))
    );

    let Some(ExpandedType::Enum(role)) = member.field("role").map(|field| &field.ty) else {
        panic!("role is inlined as an enum");
    };
    let values: Vec<_> = role
        .values
        .iter()
        .map(|value| (value.name.as_str(), value.deprecation_reason.as_deref()))
        .collect();
    assert_eq!(
        values,
        [
            ("MEMBER", None),
            ("LIBRARIAN", None),
            ("GUEST", Some("No longer supported")),
        ]
    );

    let loans = member.field("loans").expect("loans field");
    let ExpandedType::List(list) = &loans.ty else {
        panic!("loans is a list");
    };
    let loan = list.of_type.as_object().expect("loan is inlined");
    assert_eq!(
        loan.field("member").map(|field| &field.ty),
        Some(&ExpandedType::circular_ref("Member"))
    );
    assert_eq!(
        loans
            .args
            .as_ref()
            .and_then(|args| args.first())
            .and_then(|arg| arg.default_value.clone()),
        Some(json!(true))
    );

    let book = loan
        .field("book")
        .and_then(|field| field.ty.as_object())
        .expect("book is inlined");
    assert!(!book.is_collapsible);
    let author = book
        .field("author")
        .and_then(|field| field.ty.as_object())
        .expect("author is inlined");
    assert!(author.is_collapsible);
}

#[test]
fn max_depth_limits_inlining() {
    let config = TransformConfig {
        max_depth: 1,
        ..Default::default()
    };
    let generated = generate(&library(), &[], &config);
    let member = catalog_object(&generated.doc_model, "Member");

    let Some(ExpandedType::List(loans)) = member.field("loans").map(|field| &field.ty) else {
        panic!("loans is a list");
    };
    let loan = loans.of_type.as_object().expect("loan is inlined at depth one");
    assert_eq!(
        loan.field("book").map(|field| &field.ty),
        Some(&ExpandedType::type_ref("Book"))
    );
}

#[test]
fn union_members_are_inlined() {
    let generated = generate(&library(), &[], &TransformConfig::default());

    let Some(ExpandedType::Union(search)) = generated.doc_model.type_named("SearchResult") else {
        panic!("SearchResult is a union");
    };

    let members: Vec<_> = search
        .possible_types
        .iter()
        .filter_map(ExpandedType::as_object)
        .map(|member| member.name.as_str())
        .collect();
    assert_eq!(members, ["Book", "Author"]);
}

#[test]
fn input_objects_keep_their_kind() {
    let generated = generate(&library(), &[], &TransformConfig::default());

    let Some(ExpandedType::InputObject(input)) = generated.doc_model.type_named("MemberInput")
    else {
        panic!("MemberInput is an input object");
    };

    let fields: Vec<_> = input.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(fields, ["name", "role"]);
}
