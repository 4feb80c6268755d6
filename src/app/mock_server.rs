// In-process stand-in for the remote task service, used by the tests.
// Keeps tasks in memory and records every request it receives.
use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::app::models::Task;

const BASE_PATH: &str = "/api/tasks";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    tasks: Vec<Task>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    // Answer POST/PATCH/DELETE with 500 while set
    failing: bool,
    // Answer GET on the collection with 500 while set
    failing_list: bool,
    // Answer GETs with 200 and a body that is not JSON while set
    malformed: bool,
}

impl MockState {
    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.push(RecordedRequest { method, path, body });
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockTaskServer {
    addr: SocketAddr,
    state: Shared,
}

impl MockTaskServer {
    pub async fn start() -> MockTaskServer {
        let state: Shared = Arc::new(Mutex::new(MockState {
            next_id: 1,
            ..MockState::default()
        }));

        let list = warp::path!("api" / "tasks")
            .and(warp::get())
            .and(with_state(state.clone()))
            .map(list_tasks);
        let create = warp::path!("api" / "tasks")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_state(state.clone()))
            .map(create_task);
        let get = warp::path!("api" / "tasks" / i64)
            .and(warp::get())
            .and(with_state(state.clone()))
            .map(get_task);
        let patch = warp::path!("api" / "tasks" / i64)
            .and(warp::patch())
            .and(warp::body::json())
            .and(with_state(state.clone()))
            .map(patch_task);
        let delete = warp::path!("api" / "tasks" / i64)
            .and(warp::delete())
            .and(with_state(state.clone()))
            .map(delete_task);

        let routes = list.or(create).or(get).or(patch).or(delete);
        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        MockTaskServer { addr, state }
    }

    // A URL on a loopback port nobody listens on
    pub fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}{BASE_PATH}")
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, BASE_PATH)
    }

    pub fn seed(&self, tasks: Vec<Task>) {
        let mut state = self.state.lock().unwrap();
        state.next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        state.tasks = tasks;
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn set_list_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing_list = failing;
    }

    pub fn set_malformed(&self, malformed: bool) {
        self.state.lock().unwrap().malformed = malformed;
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    // Number of recorded requests matching method and path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    pub fn reloads(&self) -> usize {
        self.count("GET", BASE_PATH)
    }
}

fn with_state(state: Shared) -> impl Filter<Extract = (Shared,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn item_path(id: i64) -> String {
    format!("{BASE_PATH}/{id}")
}

fn status(code: StatusCode) -> Response {
    warp::reply::with_status(warp::reply(), code).into_response()
}

fn malformed_body() -> Response {
    warp::reply::with_status("<html>not json</html>", StatusCode::OK).into_response()
}

fn list_tasks(state: Shared) -> Response {
    let mut state = state.lock().unwrap();
    state.record("GET", BASE_PATH.to_string(), None);
    if state.failing_list {
        return status(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if state.malformed {
        return malformed_body();
    }
    warp::reply::json(&state.tasks).into_response()
}

fn get_task(id: i64, state: Shared) -> Response {
    let mut state = state.lock().unwrap();
    state.record("GET", item_path(id), None);
    if state.malformed {
        return malformed_body();
    }
    match state.find_mut(id) {
        Some(task) => warp::reply::json(&*task).into_response(),
        None => status(StatusCode::NOT_FOUND),
    }
}

fn create_task(body: Value, state: Shared) -> Response {
    let mut state = state.lock().unwrap();
    state.record("POST", BASE_PATH.to_string(), Some(body.clone()));
    if state.failing {
        return status(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let mut task: Task = match serde_json::from_value(body) {
        Ok(task) => task,
        Err(_) => return status(StatusCode::BAD_REQUEST),
    };
    task.id = state.next_id;
    state.next_id += 1;
    state.tasks.push(task.clone());
    warp::reply::with_status(warp::reply::json(&task), StatusCode::CREATED).into_response()
}

fn patch_task(id: i64, body: Value, state: Shared) -> Response {
    let mut state = state.lock().unwrap();
    state.record("PATCH", item_path(id), Some(body.clone()));
    if state.failing {
        return status(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let Some(task) = state.find_mut(id) else {
        return status(StatusCode::NOT_FOUND);
    };
    if let Some(title) = body.get("title").and_then(Value::as_str) {
        task.title = title.to_string();
    }
    if let Some(completed) = body.get("completed").and_then(Value::as_bool) {
        task.completed = completed;
    }
    warp::reply::json(&*task).into_response()
}

fn delete_task(id: i64, state: Shared) -> Response {
    let mut state = state.lock().unwrap();
    state.record("DELETE", item_path(id), None);
    if state.failing {
        return status(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let before = state.tasks.len();
    state.tasks.retain(|task| task.id != id);
    if state.tasks.len() == before {
        status(StatusCode::NOT_FOUND)
    } else {
        status(StatusCode::NO_CONTENT)
    }
}
