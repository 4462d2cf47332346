#![allow(non_snake_case)]

use super::*;
use crate::model::{EnumModel, IndexModel};
use crate::naming::EnglishInflector;

fn blog_model() -> DatabaseModel {
    DatabaseModel::new()
        .with_table(
            TableModel::new("users")
                .column(ColumnModel::new("id", "integer").primary_key().increment())
                .column(ColumnModel::new("username", "varchar(50)").not_null())
                .column(ColumnModel::new("email", "varchar").unique())
                .column(ColumnModel::new("created_at", "timestamp")),
        )
        .with_table(
            TableModel::new("posts")
                .column(ColumnModel::new("id", "integer").primary_key())
                .column(ColumnModel::new("title", "varchar"))
                .column(ColumnModel::new("user_id", "integer").not_null()),
        )
        .with_table(
            TableModel::new("follows")
                .column(ColumnModel::new("following_user_id", "integer"))
                .column(ColumnModel::new("followed_user_id", "integer")),
        )
        .with_relationship(RelationshipModel::new("posts", ["user_id"], "users", ["id"]))
        .with_relationship(RelationshipModel::new(
            "follows",
            ["following_user_id"],
            "users",
            ["id"],
        ))
        .with_relationship(RelationshipModel::new(
            "follows",
            ["followed_user_id"],
            "users",
            ["id"],
        ))
}

fn plan_with<'m>(
    model: &'m DatabaseModel,
    target: &TargetDescriptor,
) -> Result<SchemaPlan<'m>, Vec<GenerateError>> {
    let inflector = EnglishInflector::new();
    let config = GeneratorConfig::default();
    Planner::new(&inflector, &config).plan(model, target)
}

fn plan(model: &DatabaseModel) -> Result<SchemaPlan<'_>, Vec<GenerateError>> {
    plan_with(model, &TargetDescriptor::new("BlogContext", "Blog.Data", "blog.json"))
}

fn navigation_names<'a>(entity: &'a EntityPlan<'_>) -> Vec<&'a str> {
    entity.navigations.iter().map(|n| n.name.as_str()).collect()
}

// ============================================================================
// Entities and properties
// ============================================================================

#[test]
fn Planner___plan___entities_in_declaration_order() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let names: Vec<&str> = plan.entities.iter().map(|e| e.name.as_str()).collect();
    let sets: Vec<&str> = plan.entities.iter().map(|e| e.set_name.as_str()).collect();
    assert_eq!(names, vec!["User", "Post", "Follow"]);
    assert_eq!(sets, vec!["Users", "Posts", "Follows"]);
}

#[test]
fn Planner___plan___properties_are_humanized_and_typed() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let user = plan.entity("User").unwrap();
    let username = user.property("username").unwrap();
    assert_eq!(username.name, "Username");
    assert_eq!(username.type_name(), "string");
    assert!(username.required);
    assert_eq!(username.ty.length, Some(50));

    let created_at = user.property("created_at").unwrap();
    assert_eq!(created_at.name, "CreatedAt");
    assert_eq!(created_at.type_name(), "DateTime?");
    assert!(!created_at.required);
}

#[test]
fn Planner___plan___single_column_key_marks_property() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let user = plan.entity("User").unwrap();
    let key = user.key.as_ref().unwrap();
    assert_eq!(key.properties, vec!["Id"]);
    assert_eq!(key.name, "PK_users");
    assert!(user.property("id").unwrap().is_key);
    assert!(!user.property("id").unwrap().nullable);
    assert!(!user.has_composite_key());
}

#[test]
fn Planner___plan___composite_key_from_unique_index() {
    let model = DatabaseModel::new().with_table(
        TableModel::new("task_dependencies")
            .column(ColumnModel::new("task_id", "varchar"))
            .column(ColumnModel::new("dependency_task_id", "varchar"))
            .column(ColumnModel::new("project_id", "varchar"))
            .index(
                IndexModel::new(["task_id", "dependency_task_id", "project_id"])
                    .unique()
                    .primary_key(),
            ),
    );

    let plan = plan(&model).unwrap();

    let entity = &plan.entities[0];
    assert_eq!(entity.name, "TaskDependency");
    assert!(entity.has_composite_key());
    let key = entity.key.as_ref().unwrap();
    assert_eq!(key.properties, vec!["TaskId", "DependencyTaskId", "ProjectId"]);
    assert_eq!(entity.properties.len(), 3);
    assert!(entity.properties.iter().all(|p| !p.is_key && !p.nullable));
    assert!(entity.indexes.is_empty());
}

#[test]
fn Planner___plan___explicit_key_name_kept() {
    let model = DatabaseModel::new().with_table(
        TableModel::new("projects")
            .column(ColumnModel::new("id", "uuid"))
            .index(IndexModel::new(["id"]).primary_key().named("pk_projects")),
    );

    let plan = plan(&model).unwrap();

    assert_eq!(plan.entities[0].key.as_ref().unwrap().name, "pk_projects");
}

#[test]
fn Planner___plan___keyless_table_reported() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let keyless: Vec<&str> = plan.keyless_entities().map(|e| e.name.as_str()).collect();
    assert_eq!(keyless, vec!["Follow"]);
}

// ============================================================================
// Indexes
// ============================================================================

#[test]
fn Planner___plan___unique_column_becomes_named_index() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let user = plan.entity("User").unwrap();
    assert_eq!(
        user.indexes,
        vec![IndexPlan {
            properties: vec!["Email".to_string()],
            name: "IX_User_Email".to_string(),
            unique: true,
        }]
    );
}

#[test]
fn Planner___plan___declared_index_name_wins_and_duplicates_collapse() {
    let model = DatabaseModel::new().with_table(
        TableModel::new("users")
            .column(ColumnModel::new("id", "integer").primary_key())
            .column(ColumnModel::new("email", "varchar").unique())
            .column(ColumnModel::new("last_name", "varchar"))
            .column(ColumnModel::new("first_name", "varchar"))
            .index(IndexModel::new(["email"]).unique().named("ux_users_email"))
            .index(IndexModel::new(["last_name", "first_name"])),
    );

    let plan = plan(&model).unwrap();

    let indexes = &plan.entities[0].indexes;
    assert_eq!(indexes.len(), 2);
    assert_eq!(indexes[0].name, "ux_users_email");
    assert_eq!(indexes[1].name, "IX_User_LastName_FirstName");
    assert!(!indexes[1].unique);
}

// ============================================================================
// Navigations
// ============================================================================

#[test]
fn Planner___plan___many_to_one_gives_reference_and_collection() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let post = plan.entity("Post").unwrap();
    assert_eq!(navigation_names(post), vec!["UserNavigation"]);
    let navigation = &post.navigations[0];
    assert_eq!(navigation.cardinality, Cardinality::ManyToOne);
    assert_eq!(navigation.target_entity, "User");
    assert_eq!(navigation.inverse, "Posts");
    assert_eq!(navigation.foreign_key, vec!["UserId"]);
    assert_eq!(navigation.principal_key, vec!["Id"]);
    assert!(!navigation.is_collection());

    let user = plan.entity("User").unwrap();
    let posts = &user.navigations[0];
    assert_eq!(posts.name, "Posts");
    assert_eq!(posts.cardinality, Cardinality::OneToMany);
    assert_eq!(posts.inverse, "UserNavigation");
    assert_eq!(posts.endpoint, Endpoint::Right);
}

#[test]
fn Planner___plan___same_target_relationships_are_qualified() {
    let model = blog_model();

    let plan = plan(&model).unwrap();

    let user = plan.entity("User").unwrap();
    assert_eq!(
        navigation_names(user),
        vec!["Posts", "FollowingUsers", "FollowedUsers"]
    );
    assert_eq!(user.collections().count(), 3);
    assert_eq!(user.owned_navigations().count(), 0);

    let follow = plan.entity("Follow").unwrap();
    assert_eq!(
        navigation_names(follow),
        vec!["FollowingUserNavigation", "FollowedUserNavigation"]
    );
    assert_eq!(follow.owned_navigations().count(), 2);
}

#[test]
fn Planner___plan___self_reference_adds_both_members_to_one_entity() {
    let model = DatabaseModel::new()
        .with_table(
            TableModel::new("employees")
                .column(ColumnModel::new("id", "integer").primary_key())
                .column(ColumnModel::new("manager_id", "integer")),
        )
        .with_relationship(RelationshipModel::new(
            "employees",
            ["manager_id"],
            "employees",
            ["id"],
        ));

    let plan = plan(&model).unwrap();

    let employee = &plan.entities[0];
    assert_eq!(
        navigation_names(employee),
        vec!["ManagerNavigation", "Managers"]
    );
    assert_eq!(employee.navigations[0].endpoint, Endpoint::Left);
    assert_eq!(employee.navigations[1].endpoint, Endpoint::Right);
}

#[test]
fn Planner___plan___self_referencing_one_to_one___distinct_members_without_collision() {
    let model = DatabaseModel::new()
        .with_table(
            TableModel::new("users")
                .column(ColumnModel::new("id", "integer").primary_key())
                .column(ColumnModel::new("successor_id", "integer").unique()),
        )
        .with_relationship(RelationshipModel::new(
            "users",
            ["successor_id"],
            "users",
            ["id"],
        ));

    let plan = plan(&model).unwrap();

    let user = plan.entity("User").unwrap();
    assert_eq!(
        navigation_names(user),
        vec!["SuccessorNavigation", "InverseSuccessorNavigation"]
    );
    assert_eq!(user.navigations[0].cardinality, Cardinality::OneToOne);
    assert_eq!(user.navigations[0].inverse, "InverseSuccessorNavigation");
    assert_eq!(user.navigations[1].inverse, "SuccessorNavigation");
}

#[test]
fn Planner___plan___composite_foreign_key_is_one_navigation() {
    let model = DatabaseModel::new()
        .with_table(
            TableModel::new("merchants")
                .column(ColumnModel::new("id", "integer"))
                .column(ColumnModel::new("country_code", "integer"))
                .index(IndexModel::new(["id", "country_code"]).primary_key()),
        )
        .with_table(
            TableModel::new("merchant_periods")
                .column(ColumnModel::new("id", "integer").primary_key())
                .column(ColumnModel::new("merchant_id", "integer"))
                .column(ColumnModel::new("country_code", "integer")),
        )
        .with_relationship(RelationshipModel::new(
            "merchant_periods",
            ["merchant_id", "country_code"],
            "merchants",
            ["id", "country_code"],
        ));

    let plan = plan(&model).unwrap();

    let period = plan.entity("MerchantPeriod").unwrap();
    assert_eq!(navigation_names(period), vec!["MerchantNavigation"]);
    assert_eq!(
        period.navigations[0].foreign_key,
        vec!["MerchantId", "CountryCode"]
    );
    let merchant = plan.entity("Merchant").unwrap();
    assert_eq!(navigation_names(merchant), vec!["MerchantPeriods"]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn Planner___plan___same_qualifier_twice___naming_collision() {
    let model = DatabaseModel::new()
        .with_table(TableModel::new("users").column(ColumnModel::new("id", "integer").primary_key()))
        .with_table(
            TableModel::new("tasks")
                .column(ColumnModel::new("id", "integer").primary_key())
                .column(ColumnModel::new("owner_id", "integer"))
                .column(ColumnModel::new("owner_fk", "integer")),
        )
        .with_relationship(RelationshipModel::new("tasks", ["owner_id"], "users", ["id"]))
        .with_relationship(RelationshipModel::new("tasks", ["owner_fk"], "users", ["id"]));

    let errors = plan(&model).unwrap_err();

    let collisions: Vec<(&str, &str)> = errors
        .iter()
        .filter_map(|e| match e {
            GenerateError::NamingCollision { scope, name, .. } => {
                Some((scope.as_str(), name.as_str()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        collisions,
        vec![
            ("entity 'User'", "Owners"),
            ("entity 'Task'", "OwnerNavigation"),
        ]
    );
}

#[test]
fn Planner___plan___navigation_equal_to_property___naming_collision() {
    let model = DatabaseModel::new()
        .with_table(TableModel::new("users").column(ColumnModel::new("id", "integer").primary_key()))
        .with_table(
            TableModel::new("posts")
                .column(ColumnModel::new("id", "integer").primary_key())
                .column(ColumnModel::new("author_id", "integer"))
                .column(ColumnModel::new("author_navigation", "varchar")),
        )
        .with_relationship(RelationshipModel::new("posts", ["author_id"], "users", ["id"]));

    let errors = plan(&model).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        GenerateError::NamingCollision { name, first, .. }
            if name == "AuthorNavigation" && first == "column 'posts.author_navigation'"
    ));
}

#[test]
fn Planner___plan___enum_named_like_entity___namespace_collision() {
    let model = blog_model().with_enum(EnumModel::new("Post", ["Draft"]));

    let errors = plan(&model).unwrap_err();

    assert_eq!(
        errors,
        vec![GenerateError::NamingCollision {
            scope: "namespace 'Blog.Data'".into(),
            name: "Post".into(),
            first: "table 'posts'".into(),
            second: "enum 'Post'".into(),
        }]
    );
}

#[test]
fn Planner___plan___context_class_named_like_entity___collision() {
    let model = blog_model();
    let target = TargetDescriptor::new("User", "", "blog.json");

    let errors = plan_with(&model, &target).unwrap_err();

    assert!(matches!(
        &errors[0],
        GenerateError::NamingCollision { scope, first, .. }
            if scope == "the global namespace" && first == "the context class"
    ));
}

#[test]
fn Planner___plan___arity_mismatch___unsupported_shape() {
    let model = blog_model().with_relationship(RelationshipModel::new(
        "posts",
        ["user_id", "title"],
        "users",
        ["id"],
    ));

    let errors = plan(&model).unwrap_err();

    assert_eq!(
        errors,
        vec![GenerateError::UnsupportedRelationshipShape {
            relationship: "posts.(user_id, title) > users.(id)".into(),
            left_arity: 2,
            right_arity: 1,
        }]
    );
}

#[test]
fn Planner___plan___empty_column_lists___unsupported_shape() {
    let empty: [&str; 0] = [];
    let model = blog_model().with_relationship(RelationshipModel::new("posts", empty, "users", empty));

    let errors = plan(&model).unwrap_err();

    assert!(matches!(
        errors[0],
        GenerateError::UnsupportedRelationshipShape {
            left_arity: 0,
            right_arity: 0,
            ..
        }
    ));
}

#[test]
fn Planner___plan___unknown_table___unknown_endpoint() {
    let model =
        blog_model().with_relationship(RelationshipModel::new("comments", ["post_id"], "posts", ["id"]));

    let errors = plan(&model).unwrap_err();

    assert_eq!(
        errors,
        vec![GenerateError::UnknownRelationshipEndpoint {
            relationship: "comments.(post_id) > posts.(id)".into(),
            what: "table 'comments'".into(),
        }]
    );
}

#[test]
fn Planner___plan___unknown_column___unknown_endpoint() {
    let model =
        blog_model().with_relationship(RelationshipModel::new("posts", ["user_id"], "users", ["uuid"]));

    let errors = plan(&model).unwrap_err();

    assert!(matches!(
        &errors[0],
        GenerateError::UnknownRelationshipEndpoint { what, .. } if what == "column 'users.uuid'"
    ));
}

#[test]
fn Planner___plan___custom_navigation_suffix() {
    let model = blog_model();
    let inflector = EnglishInflector::new();
    let config = GeneratorConfig::default().with_navigation_suffix("Ref");
    let target = TargetDescriptor::new("BlogContext", "Blog.Data", "blog.json");

    let plan = Planner::new(&inflector, &config).plan(&model, &target).unwrap();

    assert_eq!(
        navigation_names(plan.entity("Post").unwrap()),
        vec!["UserRef"]
    );
}
