use glam::{Mat4, Vec3};

/// Model-view matrix stack with push/pop scoping.
///
/// The stack is never empty; the bottom entry is the matrix the frame starts
/// from and no scope can remove it.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self { stack: vec![Mat4::IDENTITY] }
    }

    #[inline]
    pub fn top(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        if self.stack.is_empty() {
            self.stack.push(Mat4::IDENTITY);
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub fn load(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    /// Post-multiplies the top entry (`top = top * m`).
    pub fn mul(&mut self, m: Mat4) {
        let top = self.top_mut();
        *top *= m;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.mul(Mat4::from_translation(offset));
    }

    /// Duplicates the top entry.
    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Runs `f` on a copy of the top entry, then restores the stack to its
    /// previous depth.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.depth();
        self.push();
        let out = f(self);
        self.stack.truncate(depth);
        out
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
