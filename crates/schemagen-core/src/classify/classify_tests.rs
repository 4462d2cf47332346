#![allow(non_snake_case)]

use super::*;
use crate::model::{ColumnModel, IndexModel};

fn posts_table() -> TableModel {
    TableModel::new("posts")
        .column(ColumnModel::new("id", "integer").primary_key())
        .column(ColumnModel::new("user_id", "integer").not_null())
}

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

#[test]
fn Classification___plain_foreign_key___many_to_one_from_left() {
    let rel = RelationshipModel::new("posts", ["user_id"], "users", ["id"]);

    let classification = Classification::of(&rel, &posts_table());

    assert_eq!(classification.left, Cardinality::ManyToOne);
    assert_eq!(classification.right, Cardinality::OneToMany);
    assert!(classification.for_endpoint(Endpoint::Right).is_collection());
    assert!(!classification.for_endpoint(Endpoint::Left).is_collection());
}

#[test]
fn Classification___unique_index_on_foreign_key___one_to_one() {
    let table = posts_table().index(IndexModel::new(["user_id"]).unique());
    let rel = RelationshipModel::new("posts", ["user_id"], "users", ["id"]);

    let classification = Classification::of(&rel, &table);

    assert_eq!(classification.left, Cardinality::OneToOne);
    assert_eq!(classification.right, Cardinality::OneToOne);
}

#[test]
fn Classification___non_unique_index_on_foreign_key___many_to_one() {
    let table = posts_table().index(IndexModel::new(["user_id"]));
    let rel = RelationshipModel::new("posts", ["user_id"], "users", ["id"]);

    let classification = Classification::of(&rel, &table);

    assert_eq!(classification.left, Cardinality::ManyToOne);
}

#[test]
fn Classification___foreign_key_is_primary_key___one_to_one() {
    let table = TableModel::new("user_profiles")
        .column(ColumnModel::new("user_id", "integer").primary_key());
    let rel = RelationshipModel::new("user_profiles", ["user_id"], "users", ["id"]);

    let classification = Classification::of(&rel, &table);

    assert_eq!(classification.left, Cardinality::OneToOne);
}

#[test]
fn Classification___unique_column_flag___one_to_one() {
    let table = TableModel::new("passports")
        .column(ColumnModel::new("id", "integer").primary_key())
        .column(ColumnModel::new("person_id", "integer").unique());
    let rel = RelationshipModel::new("passports", ["person_id"], "people", ["id"]);

    let classification = Classification::of(&rel, &table);

    assert_eq!(classification.left, Cardinality::OneToOne);
}

#[test]
fn is_unique_column_set___part_of_composite_key___not_unique() {
    let table = TableModel::new("task_dependencies")
        .column(ColumnModel::new("task_id", "varchar"))
        .column(ColumnModel::new("dependency_task_id", "varchar"))
        .column(ColumnModel::new("project_id", "varchar"))
        .index(
            IndexModel::new(["task_id", "dependency_task_id", "project_id"])
                .primary_key(),
        );

    assert!(!is_unique_column_set(
        &table,
        &names(&["task_id", "project_id"])
    ));
}

#[test]
fn is_unique_column_set___superset_of_key___unique() {
    let table = TableModel::new("merchant_periods")
        .column(ColumnModel::new("merchant_id", "integer"))
        .column(ColumnModel::new("country_code", "integer"))
        .index(IndexModel::new(["merchant_id"]).unique());

    assert!(is_unique_column_set(
        &table,
        &names(&["country_code", "merchant_id"])
    ));
}

#[test]
fn is_unique_column_set___column_order_ignored() {
    let table = TableModel::new("t")
        .column(ColumnModel::new("a", "int"))
        .column(ColumnModel::new("b", "int"))
        .index(IndexModel::new(["a", "b"]).unique());

    assert!(is_unique_column_set(&table, &names(&["b", "a"])));
}

#[test]
fn is_unique_column_set___empty_columns___false() {
    assert!(!is_unique_column_set(&posts_table(), &[]));
}

#[test]
fn Endpoint___opposite___swaps_sides() {
    assert_eq!(Endpoint::Left.opposite(), Endpoint::Right);
    assert_eq!(Endpoint::Right.opposite(), Endpoint::Left);
}

#[test]
fn Cardinality___display___variant_name() {
    assert_eq!(Cardinality::ManyToOne.to_string(), "ManyToOne");
}
