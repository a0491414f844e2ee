//! Loaders and files for module data on the local filesystem.
//!
//! A [`Loader`] is bound to one module's `data` directory. [`Loader::load`]
//! only builds a [`File`] handle; the filesystem is first touched by
//! [`File::lstat`], [`File::open`] or [`File::read`].

use crate::error::{Cause, Error, Op};
use crate::locator::LocatorKind;
use crate::module::Module;
use crate::paths::is_dir;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct Loader {
    locator: LocatorKind,
    module: Module,
    root: PathBuf,
}

impl Loader {
    pub(crate) fn new(locator: LocatorKind, module: Module, root: PathBuf) -> Self {
        Self {
            locator,
            module,
            root,
        }
    }

    pub fn locator(&self) -> LocatorKind {
        self.locator
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Absolute path of the module data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if the module data directory exists.
    pub fn has_data(&self) -> bool {
        is_dir(&self.root)
    }

    /// Returns the file at `name`, relative to the data directory and
    /// without a `data/` prefix.
    pub fn load(&self, name: &str) -> Result<File, Error> {
        let relative = Path::new(name);
        if relative.is_absolute() || relative.has_root() {
            return Err(Error::new(self.locator, Cause::NotRelative(name.to_string()))
                .with_module(&self.module)
                .with_op(Op::Load));
        }

        Ok(File {
            loader: self.clone(),
            name: name.to_string(),
        })
    }
}

/// A module data file that has not been accessed yet.
#[derive(Clone, Debug)]
pub struct File {
    loader: Loader,
    name: String,
}

impl File {
    /// The file name, relative to the data directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> PathBuf {
        self.loader.root.join(&self.name)
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Metadata for the file itself; a symbolic link is not followed.
    pub fn lstat(&self) -> Result<fs::Metadata, Error> {
        fs::symlink_metadata(self.path()).map_err(|err| self.error(Op::Lstat, err))
    }

    /// Opens a regular file for reading, following symbolic links.
    ///
    /// Directories and other non-regular files are rejected before they are
    /// opened, so a FIFO never blocks the caller, and the opened handle is
    /// checked again. The handle is closed when dropped.
    pub fn open(&self) -> Result<fs::File, Error> {
        let path = self.path();
        let meta = fs::metadata(&path).map_err(|err| self.error(Op::Open, err))?;
        self.ensure_regular(&meta)?;

        let file = fs::File::open(&path).map_err(|err| self.error(Op::Open, err))?;
        let meta = file.metadata().map_err(|err| self.error(Op::Open, err))?;
        self.ensure_regular(&meta)?;
        Ok(file)
    }

    /// Opens the file, runs `f` on the handle and closes it again, whether or
    /// not `f` succeeds.
    pub fn with_reader<T>(
        &self,
        f: impl FnOnce(&mut fs::File) -> io::Result<T>,
    ) -> Result<T, Error> {
        let mut file = self.open()?;
        f(&mut file).map_err(|err| self.error(Op::Read, err))
    }

    /// Reads the whole file.
    pub fn read(&self) -> Result<Vec<u8>, Error> {
        self.with_reader(|file| {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(buf)
        })
    }

    fn ensure_regular(&self, meta: &fs::Metadata) -> Result<(), Error> {
        if meta.is_file() {
            Ok(())
        } else {
            Err(self.fail(Op::Open, Cause::NotRegularFile(self.name.clone())))
        }
    }

    fn error(&self, op: Op, err: io::Error) -> Error {
        let cause = if err.kind() == io::ErrorKind::NotFound && !self.loader.has_data() {
            Cause::NoData(self.loader.module.clone())
        } else {
            Cause::from(err)
        };
        self.fail(op, cause)
    }

    fn fail(&self, op: Op, cause: Cause) -> Error {
        Error::new(self.loader.locator, cause)
            .with_module(&self.loader.module)
            .with_file(op, &self.name)
    }
}
