use tests::prelude::*;

use stubdb::UnknownCollectionPolicy;

fn registration_creates_collections() {
    let schema = models!(Db::new(),
        "user" => ModelDef::new().has_many("addresses"),
        "address" => ModelDef::new().belongs_to("user"),
    );

    assert!(schema.has_model("user"));
    assert!(schema.has_model("address"));
    assert!(schema.with_db(|db| db.has_collection("users") && db.has_collection("addresses")));
    assert_eq!(schema.unknown_collection_policy(), UnknownCollectionPolicy::Fail);
}

fn camel_case_model_names() {
    let schema = models!(Db::new(),
        "blogPost" => ModelDef::new().has_many("comments"),
        "comment" => ModelDef::new().belongs_to_model("post", "blogPost"),
    );

    assert!(schema.with_db(|db| db.has_collection("blog_posts")));
    let posts = assert_ok!(schema.model("blogPost"));
    assert_eq!(posts.name(), "blog_post");

    let post = posts.create(record! { "title" => "Hello" }).unwrap();
    let comment = post.invoke("createComment", record! { "body" => "First" }).unwrap();
    assert_eq!(comment.attr("blog_post_id"), Value::from(post.id()));

    let comment = schema.model("comment").unwrap().new(record! {}).unwrap();
    comment.belongs_to("post").unwrap().set(Some(&post)).unwrap();
    assert_eq!(comment.attr("post_id"), Value::from(post.id()));
}

fn duplicate_registration_fails() {
    let schema = Schema::new(Db::new());
    assert_ok!(schema.register_model("user", ModelDef::new()));

    let err = assert_err!(schema.register_model("user", ModelDef::new()));
    assert!(err.is_duplicate_registration());
    assert_eq!(err.to_string(), "model `user` is already registered");
}

fn unknown_model_fails() {
    let schema = Schema::new(Db::new());

    let err = assert_err!(schema.model("user"));
    assert!(err.is_unknown_model());
    assert_eq!(err.to_string(), "unknown model `user`");
}

fn unresolved_target_fails_on_use() {
    let schema = models!(Db::new(), "address" => ModelDef::new().belongs_to("user"));
    let address = schema.model("address").unwrap().create(record! {}).unwrap();

    let err = assert_err!(address.invoke("createUser", record! {}));
    assert!(err.is_unknown_model());
}

fn builder_seeds_fixtures() {
    let schema = models!(
        fixtures(r#"{"users": [{"id": 1, "name": "Link"}, {"id": 2, "name": "Zelda"}]}"#),
        "user" => ModelDef::new(),
    );

    assert_len!(schema.model("user").unwrap().all().unwrap(), 2);

    schema.load_json(r#"{"users": [{"name": "Impa"}]}"#).unwrap();
    let impa = assert_some!(schema.model("user").unwrap().find(3).unwrap());
    assert_eq!(impa.attr("name"), Value::from("Impa"));
}

tests!(
    registration_creates_collections,
    camel_case_model_names,
    duplicate_registration_fails,
    unknown_model_fails,
    unresolved_target_fails_on_use,
    builder_seeds_fixtures,
);
