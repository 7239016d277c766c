// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Standard capability identifiers
//!
//! The compiled terminfo format stores standard capabilities positionally:
//! the n-th boolean in the file is the n-th entry of [`BooleanCap`], and so on.
//! Newer ncurses releases may append identifiers, so a file written by an
//! older `tic` can be shorter than the enumerations below.

use std::fmt;

/// Kind of value a capability holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Boolean,
    Number,
    String,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        })
    }
}

macro_rules! capabilities {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $short:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            /// All identifiers, ordered by their position in a compiled file
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Number of identifiers known to this build
            pub const COUNT: usize = Self::ALL.len();

            /// Position of the capability in a compiled file
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize
            }

            #[must_use]
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            /// Terminfo name, e.g. `cup`
            #[must_use]
            pub const fn short_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $short,)*
                }
            }

            /// Descriptive name, e.g. `CursorAddress`
            #[must_use]
            pub const fn long_name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            #[must_use]
            pub fn from_short_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|cap| cap.short_name() == name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.long_name())
            }
        }
    };
}

capabilities! {
    /// Standard boolean capabilities, in compiled-file order
    pub enum BooleanCap {
        AutoLeftMargin = "bw",
        AutoRightMargin = "am",
        NoEscCtlc = "xsb",
        CeolStandoutGlitch = "xhp",
        EatNewlineGlitch = "xenl",
        EraseOverstrike = "eo",
        GenericType = "gn",
        HardCopy = "hc",
        HasMetaKey = "km",
        HasStatusLine = "hs",
        InsertNullGlitch = "in",
        MemoryBelow = "db",
        MemoryAbove = "da",
        MoveInsertMode = "mir",
        MoveStandoutMode = "msgr",
        OverStrike = "os",
        StatusLineEscOk = "eslok",
        DestTabsMagicSmso = "xt",
        TildeGlitch = "hz",
        TransparentUnderline = "ul",
        XonXoff = "xon",
        NeedsXonXoff = "nxon",
        PrtrSilent = "mc5i",
        HardCursor = "chts",
        NonRevRmcup = "nrrmc",
        NoPadChar = "npc",
        NonDestScrollRegion = "ndscr",
        CanChange = "ccc",
        BackColorErase = "bce",
        HueLightnessSaturation = "hls",
        ColAddrGlitch = "xhpa",
        CrCancelsMicroMode = "crxm",
        HasPrintWheel = "daisy",
        RowAddrGlitch = "xvpa",
        SemiAutoRightMargin = "sam",
        CpiChangesRes = "cpix",
        LpiChangesRes = "lpix",
        BackspacesWithBs = "OTbs",
        CrtNoScrolling = "OTns",
        NoCorrectlyWorkingCr = "OTnc",
        GnuHasMetaKey = "OTMT",
        LinefeedIsNewline = "OTNL",
        HasHardwareTabs = "OTpt",
        ReturnDoesClrEol = "OTxr",
    }
}

capabilities! {
    /// Standard numeric capabilities, in compiled-file order
    pub enum NumberCap {
        Columns = "cols",
        InitTabs = "it",
        Lines = "lines",
        LinesOfMemory = "lm",
        MagicCookieGlitch = "xmc",
        PaddingBaudRate = "pb",
        VirtualTerminal = "vt",
        WidthStatusLine = "wsl",
        NumLabels = "nlab",
        LabelHeight = "lh",
        LabelWidth = "lw",
        MaxAttributes = "ma",
        MaximumWindows = "wnum",
        MaxColors = "colors",
        MaxPairs = "pairs",
        NoColorVideo = "ncv",
        BufferCapacity = "bufsz",
        DotVertSpacing = "spinv",
        DotHorzSpacing = "spinh",
        MaxMicroAddress = "maddr",
        MaxMicroJump = "mjump",
        MicroColSize = "mcs",
        MicroLineSize = "mls",
        NumberOfPins = "npins",
        OutputResChar = "orc",
        OutputResLine = "orl",
        OutputResHorzInch = "orhi",
        OutputResVertInch = "orvi",
        PrintRate = "cps",
        WideCharSize = "widcs",
        Buttons = "btns",
        BitImageEntwining = "bitwin",
        BitImageType = "bitype",
        MagicCookieGlitchUl = "UTug",
        CarriageReturnDelay = "OTdC",
        NewLineDelay = "OTdN",
        BackspaceDelay = "OTdB",
        HorizontalTabDelay = "OTdT",
        NumberOfFunctionKeys = "OTkn",
    }
}

capabilities! {
    /// Standard string capabilities, in compiled-file order
    pub enum StringCap {
        BackTab = "cbt",
        Bell = "bel",
        CarriageReturn = "cr",
        ChangeScrollRegion = "csr",
        ClearAllTabs = "tbc",
        ClearScreen = "clear",
        ClrEol = "el",
        ClrEos = "ed",
        ColumnAddress = "hpa",
        CommandCharacter = "cmdch",
        CursorAddress = "cup",
        CursorDown = "cud1",
        CursorHome = "home",
        CursorInvisible = "civis",
        CursorLeft = "cub1",
        CursorMemAddress = "mrcup",
        CursorNormal = "cnorm",
        CursorRight = "cuf1",
        CursorToLl = "ll",
        CursorUp = "cuu1",
        CursorVisible = "cvvis",
        DeleteCharacter = "dch1",
        DeleteLine = "dl1",
        DisStatusLine = "dsl",
        DownHalfLine = "hd",
        EnterAltCharsetMode = "smacs",
        EnterBlinkMode = "blink",
        EnterBoldMode = "bold",
        EnterCaMode = "smcup",
        EnterDeleteMode = "smdc",
        EnterDimMode = "dim",
        EnterInsertMode = "smir",
        EnterSecureMode = "invis",
        EnterProtectedMode = "prot",
        EnterReverseMode = "rev",
        EnterStandoutMode = "smso",
        EnterUnderlineMode = "smul",
        EraseChars = "ech",
        ExitAltCharsetMode = "rmacs",
        ExitAttributeMode = "sgr0",
        ExitCaMode = "rmcup",
        ExitDeleteMode = "rmdc",
        ExitInsertMode = "rmir",
        ExitStandoutMode = "rmso",
        ExitUnderlineMode = "rmul",
        FlashScreen = "flash",
        FormFeed = "ff",
        FromStatusLine = "fsl",
        Init1string = "is1",
        Init2string = "is2",
        Init3string = "is3",
        InitFile = "if",
        InsertCharacter = "ich1",
        InsertLine = "il1",
        InsertPadding = "ip",
        KeyBackspace = "kbs",
        KeyCatab = "ktbc",
        KeyClear = "kclr",
        KeyCtab = "kctab",
        KeyDc = "kdch1",
        KeyDl = "kdl1",
        KeyDown = "kcud1",
        KeyEic = "krmir",
        KeyEol = "kel",
        KeyEos = "ked",
        KeyF0 = "kf0",
        KeyF1 = "kf1",
        KeyF10 = "kf10",
        KeyF2 = "kf2",
        KeyF3 = "kf3",
        KeyF4 = "kf4",
        KeyF5 = "kf5",
        KeyF6 = "kf6",
        KeyF7 = "kf7",
        KeyF8 = "kf8",
        KeyF9 = "kf9",
        KeyHome = "khome",
        KeyIc = "kich1",
        KeyIl = "kil1",
        KeyLeft = "kcub1",
        KeyLl = "kll",
        KeyNpage = "knp",
        KeyPpage = "kpp",
        KeyRight = "kcuf1",
        KeySf = "kind",
        KeySr = "kri",
        KeyStab = "khts",
        KeyUp = "kcuu1",
        KeypadLocal = "rmkx",
        KeypadXmit = "smkx",
        LabF0 = "lf0",
        LabF1 = "lf1",
        LabF10 = "lf10",
        LabF2 = "lf2",
        LabF3 = "lf3",
        LabF4 = "lf4",
        LabF5 = "lf5",
        LabF6 = "lf6",
        LabF7 = "lf7",
        LabF8 = "lf8",
        LabF9 = "lf9",
        MetaOff = "rmm",
        MetaOn = "smm",
        Newline = "nel",
        PadChar = "pad",
        ParmDch = "dch",
        ParmDeleteLine = "dl",
        ParmDownCursor = "cud",
        ParmIch = "ich",
        ParmIndex = "indn",
        ParmInsertLine = "il",
        ParmLeftCursor = "cub",
        ParmRightCursor = "cuf",
        ParmRindex = "rin",
        ParmUpCursor = "cuu",
        PkeyKey = "pfkey",
        PkeyLocal = "pfloc",
        PkeyXmit = "pfx",
        PrintScreen = "mc0",
        PrtrOff = "mc4",
        PrtrOn = "mc5",
        RepeatChar = "rep",
        Reset1string = "rs1",
        Reset2string = "rs2",
        Reset3string = "rs3",
        ResetFile = "rf",
        RestoreCursor = "rc",
        RowAddress = "vpa",
        SaveCursor = "sc",
        ScrollForward = "ind",
        ScrollReverse = "ri",
        SetAttributes = "sgr",
        SetTab = "hts",
        SetWindow = "wind",
        Tab = "ht",
        ToStatusLine = "tsl",
        UnderlineChar = "uc",
        UpHalfLine = "hu",
        InitProg = "iprog",
        KeyA1 = "ka1",
        KeyA3 = "ka3",
        KeyB2 = "kb2",
        KeyC1 = "kc1",
        KeyC3 = "kc3",
        PrtrNon = "mc5p",
        CharPadding = "rmp",
        AcsChars = "acsc",
        PlabNorm = "pln",
        KeyBtab = "kcbt",
        EnterXonMode = "smxon",
        ExitXonMode = "rmxon",
        EnterAmMode = "smam",
        ExitAmMode = "rmam",
        XonCharacter = "xonc",
        XoffCharacter = "xoffc",
        EnaAcs = "enacs",
        LabelOn = "smln",
        LabelOff = "rmln",
        KeyBeg = "kbeg",
        KeyCancel = "kcan",
        KeyClose = "kclo",
        KeyCommand = "kcmd",
        KeyCopy = "kcpy",
        KeyCreate = "kcrt",
        KeyEnd = "kend",
        KeyEnter = "kent",
        KeyExit = "kext",
        KeyFind = "kfnd",
        KeyHelp = "khlp",
        KeyMark = "kmrk",
        KeyMessage = "kmsg",
        KeyMove = "kmov",
        KeyNext = "knxt",
        KeyOpen = "kopn",
        KeyOptions = "kopt",
        KeyPrevious = "kprv",
        KeyPrint = "kprt",
        KeyRedo = "krdo",
        KeyReference = "kref",
        KeyRefresh = "krfr",
        KeyReplace = "krpl",
        KeyRestart = "krst",
        KeyResume = "kres",
        KeySave = "ksav",
        KeySuspend = "kspd",
        KeyUndo = "kund",
        KeySbeg = "kBEG",
        KeyScancel = "kCAN",
        KeyScommand = "kCMD",
        KeyScopy = "kCPY",
        KeyScreate = "kCRT",
        KeySdc = "kDC",
        KeySdl = "kDL",
        KeySelect = "kslt",
        KeySend = "kEND",
        KeySeol = "kEOL",
        KeySexit = "kEXT",
        KeySfind = "kFND",
        KeyShelp = "kHLP",
        KeyShome = "kHOM",
        KeySic = "kIC",
        KeySleft = "kLFT",
        KeySmessage = "kMSG",
        KeySmove = "kMOV",
        KeySnext = "kNXT",
        KeySoptions = "kOPT",
        KeySprevious = "kPRV",
        KeySprint = "kPRT",
        KeySredo = "kRDO",
        KeySreplace = "kRPL",
        KeySright = "kRIT",
        KeySrsume = "kRES",
        KeySsave = "kSAV",
        KeySsuspend = "kSPD",
        KeySundo = "kUND",
        ReqForInput = "rfi",
        KeyF11 = "kf11",
        KeyF12 = "kf12",
        KeyF13 = "kf13",
        KeyF14 = "kf14",
        KeyF15 = "kf15",
        KeyF16 = "kf16",
        KeyF17 = "kf17",
        KeyF18 = "kf18",
        KeyF19 = "kf19",
        KeyF20 = "kf20",
        KeyF21 = "kf21",
        KeyF22 = "kf22",
        KeyF23 = "kf23",
        KeyF24 = "kf24",
        KeyF25 = "kf25",
        KeyF26 = "kf26",
        KeyF27 = "kf27",
        KeyF28 = "kf28",
        KeyF29 = "kf29",
        KeyF30 = "kf30",
        KeyF31 = "kf31",
        KeyF32 = "kf32",
        KeyF33 = "kf33",
        KeyF34 = "kf34",
        KeyF35 = "kf35",
        KeyF36 = "kf36",
        KeyF37 = "kf37",
        KeyF38 = "kf38",
        KeyF39 = "kf39",
        KeyF40 = "kf40",
        KeyF41 = "kf41",
        KeyF42 = "kf42",
        KeyF43 = "kf43",
        KeyF44 = "kf44",
        KeyF45 = "kf45",
        KeyF46 = "kf46",
        KeyF47 = "kf47",
        KeyF48 = "kf48",
        KeyF49 = "kf49",
        KeyF50 = "kf50",
        KeyF51 = "kf51",
        KeyF52 = "kf52",
        KeyF53 = "kf53",
        KeyF54 = "kf54",
        KeyF55 = "kf55",
        KeyF56 = "kf56",
        KeyF57 = "kf57",
        KeyF58 = "kf58",
        KeyF59 = "kf59",
        KeyF60 = "kf60",
        KeyF61 = "kf61",
        KeyF62 = "kf62",
        KeyF63 = "kf63",
        ClrBol = "el1",
        ClearMargins = "mgc",
        SetLeftMargin = "smgl",
        SetRightMargin = "smgr",
        LabelFormat = "fln",
        SetClock = "sclk",
        DisplayClock = "dclk",
        RemoveClock = "rmclk",
        CreateWindow = "cwin",
        GotoWindow = "wingo",
        Hangup = "hup",
        DialPhone = "dial",
        QuickDial = "qdial",
        Tone = "tone",
        Pulse = "pulse",
        FlashHook = "hook",
        FixedPause = "pause",
        WaitTone = "wait",
        User0 = "u0",
        User1 = "u1",
        User2 = "u2",
        User3 = "u3",
        User4 = "u4",
        User5 = "u5",
        User6 = "u6",
        User7 = "u7",
        User8 = "u8",
        User9 = "u9",
        OrigPair = "op",
        OrigColors = "oc",
        InitializeColor = "initc",
        InitializePair = "initp",
        SetColorPair = "scp",
        SetForeground = "setf",
        SetBackground = "setb",
        ChangeCharPitch = "cpi",
        ChangeLinePitch = "lpi",
        ChangeResHorz = "chr",
        ChangeResVert = "cvr",
        DefineChar = "defc",
        EnterDoublewideMode = "swidm",
        EnterDraftQuality = "sdrfq",
        EnterItalicsMode = "sitm",
        EnterLeftwardMode = "slm",
        EnterMicroMode = "smicm",
        EnterNearLetterQuality = "snlq",
        EnterNormalQuality = "snrmq",
        EnterShadowMode = "sshm",
        EnterSubscriptMode = "ssubm",
        EnterSuperscriptMode = "ssupm",
        EnterUpwardMode = "sum",
        ExitDoublewideMode = "rwidm",
        ExitItalicsMode = "ritm",
        ExitLeftwardMode = "rlm",
        ExitMicroMode = "rmicm",
        ExitShadowMode = "rshm",
        ExitSubscriptMode = "rsubm",
        ExitSuperscriptMode = "rsupm",
        ExitUpwardMode = "rum",
        MicroColumnAddress = "mhpa",
        MicroDown = "mcud1",
        MicroLeft = "mcub1",
        MicroRight = "mcuf1",
        MicroRowAddress = "mvpa",
        MicroUp = "mcuu1",
        OrderOfPins = "porder",
        ParmDownMicro = "mcud",
        ParmLeftMicro = "mcub",
        ParmRightMicro = "mcuf",
        ParmUpMicro = "mcuu",
        SelectCharSet = "scs",
        SetBottomMargin = "smgb",
        SetBottomMarginParm = "smgbp",
        SetLeftMarginParm = "smglp",
        SetRightMarginParm = "smgrp",
        SetTopMargin = "smgt",
        SetTopMarginParm = "smgtp",
        StartBitImage = "sbim",
        StartCharSetDef = "scsd",
        StopBitImage = "rbim",
        StopCharSetDef = "rcsd",
        SubscriptCharacters = "subcs",
        SuperscriptCharacters = "supcs",
        TheseCauseCr = "docr",
        ZeroMotion = "zerom",
        CharSetNames = "csnm",
        KeyMouse = "kmous",
        MouseInfo = "minfo",
        ReqMousePos = "reqmp",
        GetMouse = "getm",
        SetAForeground = "setaf",
        SetABackground = "setab",
        PkeyPlab = "pfxl",
        DeviceType = "devt",
        CodeSetInit = "csin",
        Set0DesSeq = "s0ds",
        Set1DesSeq = "s1ds",
        Set2DesSeq = "s2ds",
        Set3DesSeq = "s3ds",
        SetLrMargin = "smglr",
        SetTbMargin = "smgtb",
        BitImageRepeat = "birep",
        BitImageNewline = "binel",
        BitImageCarriageReturn = "bicr",
        ColorNames = "colornm",
        DefineBitImageRegion = "defbi",
        EndBitImageRegion = "endbi",
        SetColorBand = "setcolor",
        SetPageLength = "slines",
        DisplayPcChar = "dispc",
        EnterPcCharsetMode = "smpch",
        ExitPcCharsetMode = "rmpch",
        EnterScancodeMode = "smsc",
        ExitScancodeMode = "rmsc",
        PcTermOptions = "pctrm",
        ScancodeEscape = "scesc",
        AltScancodeEsc = "scesa",
        EnterHorizontalHlMode = "ehhlm",
        EnterLeftHlMode = "elhlm",
        EnterLowHlMode = "elohlm",
        EnterRightHlMode = "erhlm",
        EnterTopHlMode = "ethlm",
        EnterVerticalHlMode = "evhlm",
        SetAAttributes = "sgr1",
        SetPglenInch = "slength",
        TermcapInit2 = "OTi2",
        TermcapReset = "OTrs",
        LinefeedIfNotLf = "OTnl",
        BackspaceIfNotBs = "OTbs",
        OtherNonFunctionKeys = "OTko",
        ArrowKeyMap = "OTma",
        AcsUlcorner = "OTG2",
        AcsLlcorner = "OTG3",
        AcsUrcorner = "OTG1",
        AcsLrcorner = "OTG4",
        AcsLtee = "OTGR",
        AcsRtee = "OTGL",
        AcsBtee = "OTGU",
        AcsTtee = "OTGD",
        AcsHline = "OTGH",
        AcsVline = "OTGV",
        AcsPlus = "OTGC",
        MemoryLock = "meml",
        MemoryUnlock = "memu",
        BoxChars1 = "box1",
    }
}
