/// Declare a binding list: a `static` [`InterruptLines`](crate::InterruptLines)
/// with its own handler slot and one trampoline per pin.
///
/// ```ignore
/// interrupt_lines! {
///     /// Rotary encoder.
///     pub static ENCODER: InterruptLines<SimPlatform> = [
///         (2, TriggerMode::BothEdges),
///         (3, TriggerMode::BothEdges),
///     ];
/// }
/// ```
///
/// The platform may be left out (`pub static ENCODER = [...]`), in which case
/// [`CurrentPlatform`](crate::CurrentPlatform) is used. Pins must be constant
/// expressions, and the list cannot be empty.
#[macro_export]
macro_rules! interrupt_lines {
    (
        $(#[$attr:meta])*
        $vis:vis static $name:ident = [$(($pin:expr, $mode:expr)),+ $(,)?];
    ) => {
        $crate::interrupt_lines! {
            $(#[$attr])*
            $vis static $name: InterruptLines<$crate::CurrentPlatform> = [$(($pin, $mode)),+];
        }
    };
    (
        $(#[$attr:meta])*
        $vis:vis static $name:ident: InterruptLines<$platform:ty> = [$(($pin:expr, $mode:expr)),+ $(,)?];
    ) => {
        $(#[$attr])*
        $vis static $name: $crate::InterruptLines<$platform> = {
            static SLOT: $crate::HandlerSlot< <$platform as $crate::Platform>::Irq > =
                $crate::HandlerSlot::new();

            fn trampoline<const PIN: u8>() {
                SLOT.dispatch(PIN);
            }

            static BINDINGS: &[$crate::LineBinding] = &[
                $($crate::LineBinding::new($pin, $mode, trampoline::<{ $pin }>)),+
            ];

            $crate::InterruptLines::new(&SLOT, BINDINGS)
        };
    };
}
