use arcbox_framebuffer::{Bitmap, BlitMode, Color, FrameBufferWrite, Framebuffer, Screen};
use arcbox_input::{ButtonSource, ButtonState, Buttons};
use arcbox_random::{EntropySource, Pcg32};
use arcbox_scheduler::{FrameRate, FrameScheduler};
use arcbox_timer::Timer;
use log::{debug, info};

/// The console: a framebuffer, the frame scheduler and button state, wired
/// to a clock, a button source and a screen.
///
/// A typical loop polls [`Arcbox::next_frame`], skips the iteration when it
/// returns `false`, and otherwise reads buttons, draws and calls
/// [`Arcbox::display`].
pub struct Arcbox<T, B, S> {
    framebuffer: Framebuffer,
    scheduler: FrameScheduler,
    buttons: ButtonState,
    timer: T,
    source: B,
    screen: S,
}

impl<T: Timer, B: ButtonSource, S: Screen> Arcbox<T, B, S> {
    pub fn new(timer: T, source: B, screen: S) -> Self {
        Arcbox {
            framebuffer: Framebuffer::new(),
            scheduler: FrameScheduler::new(FrameRate::DEFAULT),
            buttons: ButtonState::new(),
            timer,
            source,
            screen,
        }
    }

    pub fn with_frame_rate(mut self, rate: FrameRate) -> Self {
        self.scheduler.set_frame_rate(rate);
        self
    }

    /// Boots the screen. Holding UP while booting enters safe mode: the screen
    /// is blanked and nothing runs until DOWN is pressed.
    pub fn begin(&mut self) -> Result<(), S::Error> {
        self.screen.boot()?;
        info!("booted, {} Hz frame rate", self.scheduler.frame_rate().hz());
        if self.source.buttons().contains(Buttons::UP) {
            self.safe_mode()?;
        }
        Ok(())
    }

    fn safe_mode(&mut self) -> Result<(), S::Error> {
        info!("UP held at boot, entering safe mode");
        self.screen.blank()?;
        while !self.source.buttons().contains(Buttons::DOWN) {
            self.timer.idle();
        }
        info!("DOWN pressed, leaving safe mode");
        Ok(())
    }

    /// `true` when a new frame may start.
    #[inline]
    pub fn next_frame(&mut self) -> bool {
        self.scheduler.poll_frame(&self.timer)
    }

    #[inline]
    pub fn every_x_frames(&self, frames: u8) -> bool {
        self.scheduler.every_n_frames(frames)
    }

    /// Last frame's duration as a percentage of the frame budget.
    #[inline]
    pub fn cpu_load(&self) -> u64 {
        self.scheduler.load_percent()
    }

    pub fn set_frame_rate(&mut self, rate: FrameRate) {
        self.scheduler.set_frame_rate(rate);
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.scheduler.frame_count()
    }

    #[inline]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Samples the button source; edges are relative to the previous poll.
    pub fn poll(&mut self) {
        let current = self.source.buttons();
        self.buttons.poll(current);
    }

    #[inline]
    pub fn pressed(&self, buttons: Buttons) -> bool {
        self.buttons.pressed(buttons)
    }

    #[inline]
    pub fn not_pressed(&self, buttons: Buttons) -> bool {
        self.buttons.not_pressed(buttons)
    }

    #[inline]
    pub fn just_pressed(&self, button: Buttons) -> bool {
        self.buttons.just_pressed(button)
    }

    #[inline]
    pub fn just_released(&self, button: Buttons) -> bool {
        self.buttons.just_released(button)
    }

    #[inline]
    pub fn buttons(&self) -> &ButtonState {
        &self.buttons
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Hands the framebuffer to the screen.
    pub fn display(&mut self) -> Result<(), S::Error> {
        self.screen.paint(self.framebuffer.buffer())
    }

    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    #[inline]
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &Bitmap<'_>, mode: BlitMode) {
        self.framebuffer.draw_bitmap(x, y, bitmap, mode);
    }

    pub fn init_random_seed<E: EntropySource + ?Sized>(&self, source: &mut E) -> Pcg32 {
        debug!("seeding random generator at frame {}", self.frame_count());
        arcbox_random::new_random(source)
    }

    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    #[inline]
    pub fn screen(&self) -> &S {
        &self.screen
    }

    #[inline]
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }
}

impl<T: Timer, B: ButtonSource, S: Screen> FrameBufferWrite for Arcbox<T, B, S> {
    #[inline]
    fn width(&self) -> i16 {
        self.framebuffer.width()
    }

    #[inline]
    fn height(&self) -> i16 {
        self.framebuffer.height()
    }

    #[inline]
    fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.framebuffer.draw_pixel(x, y, color)
    }

    #[inline]
    fn pixel(&self, x: i16, y: i16) -> Color {
        self.framebuffer.pixel(x, y)
    }

    #[inline]
    fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Color) {
        self.framebuffer.draw_fast_hline(x, y, w, color)
    }

    #[inline]
    fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: Color) {
        self.framebuffer.draw_fast_vline(x, y, h, color)
    }

    #[inline]
    fn fill_screen(&mut self, color: Color) {
        self.framebuffer.fill_screen(color)
    }
}
