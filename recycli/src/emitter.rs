/// Receives structural list notifications, in application order.
///
/// Positions are interpreted against the list as it stands after every previous
/// notification has been applied.
pub trait UpdateSink {
    fn notify_inserted(&mut self, position: usize, count: usize);
    fn notify_removed(&mut self, position: usize, count: usize);
    fn notify_moved(&mut self, from: usize, to: usize);
    fn notify_changed(&mut self, position: usize, count: usize);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Insert,
    Remove,
    Change,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    kind: Kind,
    position: usize,
    count: usize,
}

/// Coalesces single-item notifications into ranges before forwarding them.
///
/// Moves are never merged. Call [`UpdateBatcher::flush`] (or drop the batcher) to emit the
/// last pending range.
pub struct UpdateBatcher<'a, S: UpdateSink + ?Sized> {
    sink: &'a mut S,
    pending: Option<Pending>,
}

impl<'a, S: UpdateSink + ?Sized> UpdateBatcher<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            pending: None,
        }
    }

    pub fn inserted(&mut self, position: usize, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(p) = &mut self.pending {
            if p.kind == Kind::Insert && position >= p.position && position <= p.position + p.count
            {
                p.count += count;
                return;
            }
        }
        self.replace(Kind::Insert, position, count);
    }

    pub fn removed(&mut self, position: usize, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(p) = &mut self.pending {
            if p.kind == Kind::Remove && p.position >= position && p.position <= position + count
            {
                p.count += count;
                p.position = position;
                return;
            }
        }
        self.replace(Kind::Remove, position, count);
    }

    pub fn moved(&mut self, from: usize, to: usize) {
        self.flush();
        self.sink.notify_moved(from, to);
    }

    pub fn changed(&mut self, position: usize, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(p) = &mut self.pending {
            let end = position + count;
            let pending_end = p.position + p.count;
            if p.kind == Kind::Change && position <= pending_end && end >= p.position {
                p.position = p.position.min(position);
                p.count = pending_end.max(end) - p.position;
                return;
            }
        }
        self.replace(Kind::Change, position, count);
    }

    pub fn flush(&mut self) {
        let Some(p) = self.pending.take() else {
            return;
        };
        match p.kind {
            Kind::Insert => self.sink.notify_inserted(p.position, p.count),
            Kind::Remove => self.sink.notify_removed(p.position, p.count),
            Kind::Change => self.sink.notify_changed(p.position, p.count),
        }
    }

    fn replace(&mut self, kind: Kind, position: usize, count: usize) {
        self.flush();
        self.pending = Some(Pending {
            kind,
            position,
            count,
        });
    }
}

impl<S: UpdateSink + ?Sized> Drop for UpdateBatcher<'_, S> {
    fn drop(&mut self) {
        self.flush();
    }
}
