//! Scripted in-memory display server, which records every acquisition
//! and release it performs.

use std::cell::RefCell;

use crate::backend::{Connect, Connection, Depths, OutputInfo, ScreenConfig, ScreenResources};
use crate::diagnostic::DiagnosticSink;
use crate::error::{Error, ErrorKind, Result};
use crate::mode::{ModeDescriptor, ModeId, Rotation};

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Resource {
    Connection,
    Config,
    Resources,
    OutputInfo,
    Depths,
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Event {
    Acquire(Resource),
    Release(Resource),
    QueryExtension,
    DefaultDepth,
}

/// Each `Option` field set to `None` makes the matching fetch fail.
#[derive(Debug)]
pub struct ScriptedServer {
    pub connects: bool,
    pub has_randr: bool,
    pub rotation: Option<Rotation>,
    pub descriptors: Option<Vec<ModeDescriptor>>,
    pub output_modes: Option<Vec<ModeId>>,
    pub depths: Option<Vec<u32>>,
    pub default_depth: u32,
    pub events: RefCell<Vec<Event>>,
}

pub fn desc(id: u64, width: u32, height: u32) -> ModeDescriptor {
    ModeDescriptor { id: ModeId(id), width, height }
}

impl Default for ScriptedServer {
    /// Two modes, `1:(1920,1080)` and `2:(1280,720)`, both supported by
    /// the primary output, at depths 24 and 32.
    fn default() -> Self {
        Self {
            connects: true,
            has_randr: true,
            rotation: Some(Rotation::None),
            descriptors: Some(vec![desc(1, 1920, 1080), desc(2, 1280, 720)]),
            output_modes: Some(vec![ModeId(1), ModeId(2)]),
            depths: Some(vec![24, 32]),
            default_depth: 24,
            events: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptedServer {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
    pub fn acquisitions(&self) -> Vec<Resource> {
        self.events().into_iter().filter_map(|e| match e {
            Event::Acquire(r) => Some(r),
            _ => None,
        }).collect()
    }
    pub fn releases(&self) -> Vec<Resource> {
        self.events().into_iter().filter_map(|e| match e {
            Event::Release(r) => Some(r),
            _ => None,
        }).collect()
    }
    fn record(&self, e: Event) {
        self.events.borrow_mut().push(e);
    }
    fn fetch<'c, T: Clone>(&'c self, resource: Resource, value: &Option<T>) -> Option<Fetched<'c, T>> {
        let value = value.clone()?;
        self.record(Event::Acquire(resource));
        Some(Fetched { server: self, resource, value })
    }
}

#[derive(Debug)]
pub struct MockConnection<'s> {
    server: &'s ScriptedServer,
}

impl<'s> Drop for MockConnection<'s> {
    fn drop(&mut self) {
        self.server.record(Event::Release(Resource::Connection));
    }
}

/// A fetched value which records its release.
#[derive(Debug)]
pub struct Fetched<'c, T> {
    server: &'c ScriptedServer,
    resource: Resource,
    value: T,
}

impl<'c, T> Drop for Fetched<'c, T> {
    fn drop(&mut self) {
        self.server.record(Event::Release(self.resource));
    }
}

impl<'s> Connect for &'s ScriptedServer {
    type Conn = MockConnection<'s>;
    fn open(&self) -> Result<MockConnection<'s>> {
        if !self.connects {
            return Err(Error::new(ErrorKind::ConnectionFailure, "scripted failure"));
        }
        self.record(Event::Acquire(Resource::Connection));
        Ok(MockConnection { server: *self })
    }
}

impl<'s> Connection for MockConnection<'s> {
    type Config<'c> = Fetched<'c, Rotation> where Self: 'c;
    type Resources<'c> = Fetched<'c, Vec<ModeDescriptor>> where Self: 'c;
    type OutputInfo<'c> = Fetched<'c, Vec<ModeId>> where Self: 'c;
    type Depths<'c> = Fetched<'c, Vec<u32>> where Self: 'c;

    fn default_screen(&self) -> i32 {
        0
    }
    fn default_depth(&self, _screen: i32) -> u32 {
        self.server.record(Event::DefaultDepth);
        self.server.default_depth
    }
    fn query_extension(&self, name: &str) -> bool {
        self.server.record(Event::QueryExtension);
        self.server.has_randr && name == crate::backend::RANDR_EXTENSION_NAME
    }
    fn screen_config(&self, _screen: i32) -> Option<Self::Config<'_>> {
        self.server.fetch(Resource::Config, &self.server.rotation)
    }
    fn screen_resources(&self, _screen: i32) -> Option<Self::Resources<'_>> {
        self.server.fetch(Resource::Resources, &self.server.descriptors)
    }
    fn primary_output_info<'c>(&'c self, _resources: &Self::Resources<'c>, _screen: i32) -> Option<Self::OutputInfo<'c>> {
        self.server.fetch(Resource::OutputInfo, &self.server.output_modes)
    }
    fn depths(&self, _screen: i32) -> Option<Self::Depths<'_>> {
        self.server.fetch(Resource::Depths, &self.server.depths)
    }
}

impl<'c> ScreenConfig for Fetched<'c, Rotation> {
    fn rotation(&self) -> Rotation {
        self.value
    }
}
impl<'c> ScreenResources for Fetched<'c, Vec<ModeDescriptor>> {
    fn descriptors(&self) -> &[ModeDescriptor] {
        &self.value
    }
}
impl<'c> OutputInfo for Fetched<'c, Vec<ModeId>> {
    fn modes(&self) -> &[ModeId] {
        &self.value
    }
}
impl<'c> Depths for Fetched<'c, Vec<u32>> {
    fn depths(&self) -> &[u32] {
        &self.value
    }
}

/// Keeps every diagnostic it receives.
#[derive(Debug, Default)]
pub struct RecordingSink(pub RefCell<Vec<String>>);

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, message: &str) {
        self.0.borrow_mut().push(message.to_owned());
    }
}
