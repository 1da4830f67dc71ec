/// Common trait for sample-by-sample filters
///
/// Implemented by [`LowPassFilter`](super::LowPassFilter). Callers that only
/// need to push samples through a filter should hold a `&mut dyn Filter` or
/// `Box<dyn Filter>` rather than the concrete type.
pub trait Filter {
    /// Feed one raw sample and return the filtered value
    fn transform(&mut self, sample: f64) -> f64;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.transform(*sample);
        }
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn transform(&mut self, sample: f64) -> f64 {
        (**self).transform(sample)
    }
}
