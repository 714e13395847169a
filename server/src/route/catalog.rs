use crate::controller::{Controller, Exhaust};
use crate::error::ErrorStatus;
use crate::handler::{AppModule, CatalogDatabase};
use crate::request::{
    json_body, AuthorTransformer, BookTransformer, CreateOrderRequest, DeleteOrderRequest,
    GetAuthorRequest, GetBookRequest, GetOrderRequest, OrderTransformer, PutBookRequest,
    UpdateOrderRequest,
};
use crate::response::{
    AuthorPresenter, BookPresenter, DeletedPresenter, OrderPresenter, PlacedOrderPresenter,
    ServiceDocumentResponse, ServicePresenter,
};
use application::service::{
    DeleteOrderService, GetAuthorService, GetBookService, GetOrderService, PlaceOrderService,
    UpdateBookService, UpdateOrderService,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use error_stack::Report;
use kernel::prelude::path::{EntityKey, EntitySet, ResourcePath};
use kernel::KernelError;
use serde_json::Value;

pub trait CatalogRouter {
    fn route_catalog(self) -> Self;
}

impl<D: CatalogDatabase> CatalogRouter for Router<AppModule<D>> {
    fn route_catalog(self) -> Self {
        self.route("/catalog", get(service_document).fallback(unsupported))
            .route(
                "/catalog/:segment",
                get(read::<D>)
                    .put(replace::<D>)
                    .post(create::<D>)
                    .patch(update::<D>)
                    .delete(remove::<D>)
                    .fallback(unsupported),
            )
    }
}

fn unsupported_on(method: Method, set: EntitySet) -> ErrorStatus {
    Report::new(KernelError::Unsupported)
        .attach_printable(format!("{method} is not supported on {}", set.name()))
        .into()
}

async fn unsupported(method: Method) -> ErrorStatus {
    Report::new(KernelError::Unsupported)
        .attach_printable(format!("{method} is not supported"))
        .into()
}

async fn service_document() -> ServiceDocumentResponse {
    ServicePresenter.emit(EntitySet::all())
}

async fn read<D: CatalogDatabase>(
    State(module): State<AppModule<D>>,
    Path(segment): Path<String>,
) -> Result<Response, ErrorStatus> {
    let path = ResourcePath::parse(&segment)?;
    let database = module.database();
    let response = match (path.entity_set(), path.key()?) {
        (EntitySet::Authors, EntityKey::Collection) => Controller::new((), AuthorPresenter)
            .bypass(|| database.get_all_authors())
            .await?
            .into_response(),
        (EntitySet::Authors, EntityKey::Integer(id)) => {
            Controller::new(AuthorTransformer, AuthorPresenter)
                .intake(GetAuthorRequest::new(id))
                .try_handle(|dto| async move { database.get_author(&dto).await })
                .await?
                .into_response()
        }
        (EntitySet::Books, EntityKey::Collection) => Controller::new((), BookPresenter)
            .bypass(|| database.get_all_books())
            .await?
            .into_response(),
        (EntitySet::Books, EntityKey::Integer(id)) => {
            Controller::new(BookTransformer, BookPresenter)
                .intake(GetBookRequest::new(id))
                .try_handle(|dto| async move { database.get_book(&dto).await })
                .await?
                .into_response()
        }
        (EntitySet::Orders, EntityKey::Collection) => Controller::new((), OrderPresenter)
            .bypass(|| database.get_all_orders())
            .await?
            .into_response(),
        (EntitySet::Orders, EntityKey::Uuid(id)) => {
            Controller::new(OrderTransformer, OrderPresenter)
                .intake(GetOrderRequest::new(id))
                .try_handle(|dto| async move { database.get_order(&dto).await })
                .await?
                .into_response()
        }
        (set, key) => {
            return Err(Report::new(KernelError::InvalidKey)
                .attach_printable(format!("{key:?} does not address {}", set.name()))
                .into())
        }
    };
    Ok(response)
}

async fn replace<D: CatalogDatabase>(
    State(module): State<AppModule<D>>,
    Path(segment): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ErrorStatus> {
    let path = ResourcePath::parse(&segment)?;
    let (EntitySet::Books, EntityKey::Integer(id)) = (path.entity_set(), path.key()?) else {
        return Err(unsupported_on(Method::PUT, path.entity_set()));
    };
    let body = json_body(body)?;
    let database = module.database();
    let response = Controller::new(BookTransformer, BookPresenter)
        .try_intake(PutBookRequest::new(id, body))?
        .handle(|dto| database.put_book(dto))
        .await?;
    Ok(response.into_response())
}

async fn create<D: CatalogDatabase>(
    State(module): State<AppModule<D>>,
    Path(segment): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ErrorStatus> {
    let path = ResourcePath::parse(&segment)?;
    let key = path.key()?;
    if path.entity_set() != EntitySet::Orders {
        return Err(unsupported_on(Method::POST, path.entity_set()));
    }
    if key != EntityKey::Collection {
        return Err(Report::new(KernelError::InvalidKey)
            .attach_printable("orders are placed on the collection")
            .into());
    }
    let body = json_body(body)?;
    let identity = module.identity();
    let database = module.database();
    let response = Controller::new(OrderTransformer, PlacedOrderPresenter)
        .try_intake(CreateOrderRequest::new(body))?
        .handle(|dto| async move { database.place_order(&identity, dto).await })
        .await?;
    Ok(response.into_response())
}

async fn update<D: CatalogDatabase>(
    State(module): State<AppModule<D>>,
    Path(segment): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ErrorStatus> {
    let path = ResourcePath::parse(&segment)?;
    let (EntitySet::Orders, EntityKey::Uuid(id)) = (path.entity_set(), path.key()?) else {
        return Err(unsupported_on(Method::PATCH, path.entity_set()));
    };
    let body = json_body(body)?;
    let identity = module.identity();
    let database = module.database();
    let response = Controller::new(OrderTransformer, OrderPresenter)
        .try_intake(UpdateOrderRequest::new(id, body))?
        .handle(|dto| async move { database.update_order(&identity, dto).await })
        .await?;
    Ok(response.into_response())
}

async fn remove<D: CatalogDatabase>(
    State(module): State<AppModule<D>>,
    Path(segment): Path<String>,
) -> Result<Response, ErrorStatus> {
    let path = ResourcePath::parse(&segment)?;
    let (EntitySet::Orders, EntityKey::Uuid(id)) = (path.entity_set(), path.key()?) else {
        return Err(unsupported_on(Method::DELETE, path.entity_set()));
    };
    let database = module.database();
    let response = Controller::new(OrderTransformer, DeletedPresenter)
        .intake(DeleteOrderRequest::new(id))
        .handle(|dto| async move { database.delete_order(&dto).await })
        .await?;
    Ok(response.into_response())
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::header::{CONTENT_TYPE, LOCATION};
    use axum::http::{HeaderMap, Method, Request, StatusCode};
    use axum::Router;
    use driver::database::MemoryDatabase;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::CatalogRouter;
    use crate::handler::AppModule;

    const SEEDED_ORDER: &str = "/catalog/Orders(95ca0e2b-357c-46bb-bd50-b82d17cca0e5)";

    fn app() -> Router {
        let database = MemoryDatabase::seeded().unwrap();
        Router::<AppModule<MemoryDatabase>>::new()
            .route_catalog()
            .with_state(AppModule::new(database))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = send(app, Method::GET, uri, None).await;
        (status, body)
    }

    async fn stock(app: &Router, id: i32) -> i64 {
        let (_, book) = get(app, &format!("/catalog/Books({id})")).await;
        book["stock"].as_i64().unwrap()
    }

    fn ids(body: &Value) -> Vec<i64> {
        body["value"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|entry| entry["ID"].as_i64())
            .collect()
    }

    #[tokio::test]
    async fn service_document_lists_entity_sets() {
        let app = app();
        let (status, body) = get(&app, "/catalog").await;
        assert_eq!(status, StatusCode::OK);
        let names = body["value"]
            .as_array()
            .unwrap()
            .iter()
            .map(|set| set["name"].as_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Authors", "Books", "Orders"]);
    }

    #[tokio::test]
    async fn collections_are_ordered() {
        let app = app();
        let (status, authors) = get(&app, "/catalog/Authors").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(authors["@odata.context"], "$metadata#Authors");
        assert_eq!(ids(&authors), vec![101, 107, 150, 170]);

        let (_, books) = get(&app, "/catalog/Books").await;
        assert_eq!(ids(&books), vec![201, 207, 251, 252, 271]);
        assert_eq!(books["value"][2]["title"], "The Raven -- 11% discount!");
        assert_eq!(books["value"][0]["title"], "Wuthering Heights");
    }

    #[tokio::test]
    async fn single_entities() {
        let app = app();
        let (status, book) = get(&app, "/catalog/Books(252)").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(book["@odata.context"], "$metadata#Books/$entity");
        assert_eq!(book["title"], "Eleonora -- 11% discount!");
        assert_eq!(book["author_ID"], 150);

        let (status, author) = get(&app, "/catalog/Authors(ID=170)").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(author["name"], "Richard Carpenter");

        let (status, order) = get(&app, SEEDED_ORDER).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order["book_ID"], 201);
        assert_eq!(order["country_code"], Value::Null);
        assert_eq!(order["createdBy"], "anonymous");
        assert_eq!(order["modifiedBy"], "anonymous");
    }

    #[tokio::test]
    async fn malformed_keys_are_bad_requests() {
        let app = app();
        for uri in [
            "/catalog/Authors()",
            "/catalog/Books()",
            "/catalog/Orders()",
            "/catalog/Books(whatever)",
            "/catalog/Orders(201)",
            "/catalog/Books(201",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "400", "{uri}");
        }
    }

    #[tokio::test]
    async fn missing_entities_are_not_found() {
        let app = app();
        for uri in [
            "/catalog/Books(999)",
            "/catalog/Authors(999)",
            "/catalog/Orders(00000000-0000-4000-8000-000000000000)",
            "/catalog/Publishers",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"]["code"], "404", "{uri}");
        }
    }

    #[tokio::test]
    async fn placing_an_order() {
        let app = app();
        let (status, headers, order) = send(
            &app,
            Method::POST,
            "/catalog/Orders",
            Some(json!({"book_ID": 201, "amount": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["amount"], 1);
        assert_eq!(order["createdBy"], "anonymous");
        assert_eq!(order["createdAt"], order["modifiedAt"]);
        let location = headers[LOCATION].to_str().unwrap().to_string();
        assert_eq!(
            location,
            format!("/catalog/Orders({})", order["ID"].as_str().unwrap())
        );
        assert_eq!(stock(&app, 201).await, 11);

        let (status, found) = get(&app, &location).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["ID"], order["ID"]);
    }

    #[tokio::test]
    async fn rejected_orders_leave_stock_alone() {
        let app = app();
        let cases = [
            ("/catalog/Orders()", json!({"book_ID": 201, "amount": 1}), StatusCode::BAD_REQUEST),
            ("/catalog/Orders", json!({"book_ID": 201, "amount": "x"}), StatusCode::BAD_REQUEST),
            ("/catalog/Orders", json!({"book_ID": 201, "amount": 0}), StatusCode::BAD_REQUEST),
            ("/catalog/Orders", json!({"book_ID": 999, "amount": 1}), StatusCode::BAD_REQUEST),
            ("/catalog/Orders", json!({"book_ID": 201, "amount": 13}), StatusCode::CONFLICT),
            ("/catalog/Books", json!({"book_ID": 201, "amount": 1}), StatusCode::METHOD_NOT_ALLOWED),
        ];
        for (uri, body, expected) in cases {
            let (status, _, body) = send(&app, Method::POST, uri, Some(body)).await;
            assert_eq!(status, expected, "{uri}");
            assert_eq!(body["error"]["code"], expected.as_u16().to_string());
        }
        assert_eq!(stock(&app, 201).await, 12);
        let (_, orders) = get(&app, "/catalog/Orders").await;
        assert_eq!(orders["value"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn put_resets_a_book() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/catalog/Orders",
            Some(json!({"book_ID": 201, "amount": 5})),
        )
        .await;
        assert_eq!(stock(&app, 201).await, 7);

        let reset = json!({"ID": 201, "title": "Wuthering Heights", "author_ID": 101, "stock": 12});
        let (status, _, book) =
            send(&app, Method::PUT, "/catalog/Books(201)", Some(reset.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(book["stock"], 12);
        let (status, _, again) = send(&app, Method::PUT, "/catalog/Books(201)", Some(reset)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(again, book);

        let (status, _, _) = send(
            &app,
            Method::PUT,
            "/catalog/Books",
            Some(json!({"title": "x", "author_ID": 101, "stock": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let (status, _, _) = send(
            &app,
            Method::PUT,
            "/catalog/Books(201)",
            Some(json!({"title": "x", "author_ID": 101, "stock": -1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_changes_country_only() {
        let app = app();
        let (_, before) = get(&app, SEEDED_ORDER).await;
        let (status, _, after) = send(
            &app,
            Method::PATCH,
            SEEDED_ORDER,
            Some(json!({"country_code": "DE"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(after["country_code"], "DE");
        assert_eq!(after["createdAt"], before["createdAt"]);
        assert_ne!(after["modifiedAt"], before["modifiedAt"]);

        let (status, _, _) = send(&app, Method::PATCH, SEEDED_ORDER, Some(json!({"amount": 4}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_an_order() {
        let app = app();
        let (status, _, body) = send(&app, Method::DELETE, SEEDED_ORDER, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = get(&app, SEEDED_ORDER).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = send(&app, Method::DELETE, SEEDED_ORDER, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(stock(&app, 201).await, 12);

        let (status, _, _) = send(&app, Method::DELETE, "/catalog/Orders()", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _, _) = send(&app, Method::DELETE, "/catalog/Books(201)", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_methods_are_not_allowed() {
        let app = app();
        let (status, _, body) = send(&app, Method::OPTIONS, "/catalog/Books", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"]["code"], "405");
    }
}
