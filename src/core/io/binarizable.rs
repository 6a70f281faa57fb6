pub trait DebinarizationOptions : Default {

}

pub trait Binarizable<W: ?Sized> {
    type Error;

    fn binarize(&self, writer: &mut W) -> Result<(), Self::Error>;
}

pub trait Debinarizable<R: ?Sized>: Sized {
    type Error;

    fn debinarize(reader: &mut R) -> Result<Self, Self::Error>;
}

/// Debinarization that is bounded by caller supplied options, such as length limits on the
/// records being read.
pub trait CustomDebinarizable<
    R: ?Sized,
    O: DebinarizationOptions
>: Sized {
    type Error;

    fn debinarize_with_options(reader: &mut R, options: &O) -> Result<Self, Self::Error>;

    fn debinarize_default(reader: &mut R) -> Result<Self, Self::Error> {
        Self::debinarize_with_options(reader, &O::default())
    }
}
