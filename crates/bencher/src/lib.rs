use std::fmt;

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    payload: TestPayload,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, payload: TestPayload) -> Self {
        Self { name, group, payload }
    }

    pub fn small(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Small, payload)
    }

    pub fn normal(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Normal, payload)
    }

    pub fn large(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Large, payload)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn payload(&self) -> &TestPayload {
        &self.payload
    }
}

/// An uploaded file used as benchmark input, `valid_body` false sends the body as text
#[derive(Debug, Copy, Clone)]
pub struct TestPayload {
    file_name: &'static str,
    mime_type: &'static str,
    content: &'static [u8],
    valid_body: bool,
}

impl TestPayload {
    pub const fn new(file_name: &'static str, mime_type: &'static str, content: &'static [u8]) -> Self {
        Self { file_name, mime_type, content, valid_body: true }
    }

    pub const fn with_text_body(self) -> Self {
        Self { valid_body: false, ..self }
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn is_valid_body(&self) -> bool {
        self.valid_body
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

impl fmt::Display for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestGroup::Small => f.write_str("small"),
            TestGroup::Normal => f.write_str("normal"),
            TestGroup::Large => f.write_str("large"),
        }
    }
}
