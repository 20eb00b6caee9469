//! Image viewer behavior against real and fake directory services.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::sync::{mpsc, oneshot};

use pictor::element::{ElementError, ElementRegistry, GryphIcon, ImgFrame};
use pictor::{ImageViewer, ResponseOrdering, Settlement, ViewerConfig, ViewerError};
use pictor_fs::{
    Bridge, DirEntry, DirectoryLister, DirectoryService, ListerConfig, Listing, ServiceError,
};

type Reply = Result<Listing, ServiceError>;

/// Answers every path with the same listing and records what was asked.
#[derive(Default)]
struct StaticService {
    listing: Listing,
    requested: Mutex<Vec<String>>,
}

impl DirectoryService for StaticService {
    fn list<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Reply> {
        self.requested.lock().push(path.to_string());
        let listing = self.listing.clone();
        async move { Ok(listing) }.boxed()
    }
}

/// Holds each path's reply until the test releases it.
#[derive(Default)]
struct GatedService {
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
}

impl GatedService {
    fn gate(&self, path: &str) -> oneshot::Sender<Reply> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().insert(path.to_string(), receiver);
        sender
    }
}

impl DirectoryService for GatedService {
    fn list<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Reply> {
        let gate = self.gates.lock().remove(path);
        async move {
            match gate {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(ServiceError::Unavailable("gate dropped".into()))),
                None => Ok(Listing::new()),
            }
        }
        .boxed()
    }
}

fn watch(viewer: &ImageViewer) -> mpsc::UnboundedReceiver<Settlement> {
    let (sender, receiver) = mpsc::unbounded_channel();
    viewer.settled.connect(move |settlement| {
        let _ = sender.send(settlement.clone());
    });
    receiver
}

async fn next(settlements: &mut mpsc::UnboundedReceiver<Settlement>) -> Settlement {
    tokio::time::timeout(Duration::from_secs(5), settlements.recv())
        .await
        .expect("request did not settle")
        .expect("settled signal dropped")
}

#[tokio::test]
async fn renders_directories_and_images_through_the_bridge() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.png"), b"png").unwrap();
    std::fs::write(temp.path().join("b.txt"), b"txt").unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();

    let lister = DirectoryLister::new(ListerConfig::new().with_asset_root(temp.path()));
    let client = Bridge::spawn(Arc::new(lister));
    let viewer = ImageViewer::new(Arc::new(client), ViewerConfig::default()).unwrap();
    let mut settlements = watch(&viewer);

    viewer.input().set_text(temp.path().to_string_lossy());
    let settlement = next(&mut settlements).await;
    assert!(matches!(
        settlement,
        Settlement::Applied { directories: 1, images: 1, .. }
    ));

    let sub = temp.path().join("sub").to_string_lossy().replace('\\', "/");
    assert_eq!(viewer.directories(), vec![sub]);
    assert_eq!(viewer.image_urls(), vec!["a.png".to_string()]);

    let frames = viewer.image_items().children();
    assert_eq!(frames.len(), 1);
    let frame = frames[0].as_custom::<ImgFrame>().expect("img-frame element");
    assert!(frame.presentation().as_str().contains(r#"url("a.png")"#));

    let paragraphs = viewer.directory_items().children();
    assert_eq!(paragraphs[0].tag_name(), Some("p"));
}

#[tokio::test]
async fn start_lists_the_seed_path() {
    let service = Arc::new(StaticService::default());
    let viewer = ImageViewer::new(service.clone(), ViewerConfig::default()).unwrap();
    let mut settlements = watch(&viewer);

    viewer.start();
    assert_eq!(viewer.input().text(), "./");
    assert_eq!(next(&mut settlements).await.path(), "./");
    assert_eq!(*service.requested.lock(), vec!["./".to_string()]);
}

#[tokio::test]
async fn each_set_text_issues_one_request() {
    let service = Arc::new(StaticService::default());
    let viewer = ImageViewer::new(service.clone(), ViewerConfig::default()).unwrap();
    let mut settlements = watch(&viewer);

    viewer.input().set_text("/a");
    viewer.input().set_text("/a");
    assert_eq!(viewer.latest_generation(), 2);
    next(&mut settlements).await;
    next(&mut settlements).await;
    assert_eq!(service.requested.lock().len(), 2);
}

#[tokio::test]
async fn separators_and_extensions() {
    let service = Arc::new(StaticService {
        listing: vec![
            DirEntry::directory(r"C:\photos\\2024"),
            DirEntry::file(r"..\imgs\a.png"),
            DirEntry::file("B.PNG"),
            DirEntry::file("c.jpg"),
            DirEntry::file("d.jpeg"),
            DirEntry::file("png"),
        ],
        ..Default::default()
    });
    let viewer = ImageViewer::new(service, ViewerConfig::default()).unwrap();
    let mut settlements = watch(&viewer);

    viewer.input().set_text("C:\\photos");
    next(&mut settlements).await;

    assert_eq!(viewer.directories(), vec!["C:/photos/2024".to_string()]);
    assert_eq!(
        viewer.image_urls(),
        vec!["../imgs/a.png".to_string(), "c.jpg".to_string()]
    );
}

#[tokio::test]
async fn path_change_clears_containers_immediately() {
    let service = Arc::new(GatedService::default());
    let viewer = ImageViewer::new(service.clone(), ViewerConfig::default()).unwrap();
    let mut settlements = watch(&viewer);

    let first = service.gate("/first");
    viewer.input().set_text("/first");
    first
        .send(Ok(vec![DirEntry::directory("/first/sub"), DirEntry::file("x.png")]))
        .unwrap();
    next(&mut settlements).await;
    assert_eq!(viewer.directory_items().len(), 1);
    assert_eq!(viewer.image_items().len(), 1);

    let _pending = service.gate("/second");
    viewer.input().set_text("/second");
    assert!(viewer.directory_items().is_empty());
    assert!(viewer.image_items().is_empty());
}

#[tokio::test]
async fn failed_request_leaves_containers_empty() {
    let service = Arc::new(GatedService::default());
    let viewer = ImageViewer::new(service.clone(), ViewerConfig::default()).unwrap();
    let mut settlements = watch(&viewer);

    let gate = service.gate("/broken");
    viewer.input().set_text("/broken");
    gate.send(Err(ServiceError::Unavailable("bridge down".into())))
        .unwrap();

    match next(&mut settlements).await {
        Settlement::Failed { generation, error, .. } => {
            assert_eq!(generation, 1);
            assert!(error.contains("bridge down"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(viewer.directory_items().is_empty());
    assert!(viewer.image_items().is_empty());
}

/// Two back-to-back path changes where the first response arrives last.
async fn race(ordering: ResponseOrdering) -> (Arc<ImageViewer>, Settlement, Settlement) {
    let service = Arc::new(GatedService::default());
    let config = ViewerConfig::default().with_response_ordering(ordering);
    let viewer = ImageViewer::new(service.clone(), config).unwrap();
    let mut settlements = watch(&viewer);

    let first = service.gate("/first");
    let second = service.gate("/second");
    viewer.input().set_text("/first");
    viewer.input().set_text("/second");
    assert_eq!(viewer.latest_generation(), 2);

    second.send(Ok(vec![DirEntry::file("second.png")])).unwrap();
    let newer = next(&mut settlements).await;
    assert_eq!(viewer.image_urls(), vec!["second.png".to_string()]);

    first.send(Ok(vec![DirEntry::file("first.png")])).unwrap();
    let older = next(&mut settlements).await;

    (viewer, newer, older)
}

#[tokio::test]
async fn latest_request_discards_stale_response() {
    let (viewer, newer, older) = race(ResponseOrdering::LatestRequest).await;

    assert_eq!(newer.generation(), 2);
    assert_eq!(
        older,
        Settlement::DiscardedStale {
            generation: 1,
            latest: 2,
            path: "/first".into(),
        }
    );
    assert_eq!(viewer.image_urls(), vec!["second.png".to_string()]);
}

#[tokio::test]
async fn last_response_wins_when_ordering_is_by_arrival() {
    let (viewer, newer, older) = race(ResponseOrdering::LastResponse).await;

    assert_eq!(newer.generation(), 2);
    assert!(matches!(older, Settlement::Applied { generation: 1, .. }));
    // Each render replaces the containers, so the response that arrived
    // last is what remains on screen.
    assert_eq!(viewer.image_urls(), vec!["first.png".to_string()]);
    assert_eq!(viewer.input().text(), "/second");
}

#[tokio::test]
async fn viewer_needs_img_frame_defined() {
    let mut elements = ElementRegistry::new();
    elements.define::<GryphIcon>().unwrap();

    let result = ImageViewer::with_elements(
        Arc::new(StaticService::default()),
        ViewerConfig::default(),
        tokio::runtime::Handle::current(),
        elements,
    );
    match result {
        Err(ViewerError::Element(ElementError::Undefined(tag))) => assert_eq!(tag, "img-frame"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("viewer built without img-frame"),
    }
}

#[tokio::test]
async fn image_frames_come_from_the_viewer_registry() {
    let mut elements = ElementRegistry::new();
    elements.define::<ImgFrame>().unwrap();
    let service = Arc::new(StaticService {
        listing: vec![DirEntry::file("a.png"), DirEntry::file("b.jpg")],
        ..Default::default()
    });
    let viewer = ImageViewer::with_elements(
        service,
        ViewerConfig::default(),
        tokio::runtime::Handle::current(),
        elements,
    )
    .unwrap();
    let mut settlements = watch(&viewer);

    viewer.input().set_text("/photos");
    next(&mut settlements).await;

    let frames = viewer.image_items().children();
    assert_eq!(frames.len(), 2);
    for frame in &frames {
        let frame = frame.as_custom::<ImgFrame>().expect("img-frame element");
        assert_eq!(frame.render_count(), 2);
    }
    assert_eq!(viewer.image_urls(), vec!["a.png".to_string(), "b.jpg".to_string()]);
}
